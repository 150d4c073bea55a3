//! Random passenger traffic.
//!
//! Passengers appear in random halls, call a random car, walk into whichever
//! car opens for their direction first, and walk out at their floor.  Walks
//! take a random number of ticks, which is what the boarding gate waits on.

use std::collections::BTreeMap;

use log::debug;

use lift_core::{CarId, FloorLayout, PassengerId, SimRng, Tick};
use lift_dispatch::Direction;
use lift_door::PassengerProbe;
use lift_sim::Sim;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    Waiting,
    Boarding { car: CarId, until: Tick },
    Riding { car: CarId },
    Alighting { car: CarId, until: Tick },
}

#[derive(Clone, Debug)]
struct Passenger {
    origin: i32,
    target: i32,
    stage:  Stage,
}

pub struct Crowd {
    rng:         SimRng,
    cars:        Vec<CarId>,
    floor_count: i32,
    spawn_every: u64,
    walk_ticks:  (u64, u64),
    next_id:     u32,
    passengers:  BTreeMap<PassengerId, Passenger>,
    pub spawned:   u64,
    pub delivered: u64,
}

impl Crowd {
    pub fn new(rng: SimRng, cars: Vec<CarId>, floor_count: usize, spawn_every: u64) -> Self {
        Self {
            rng,
            cars,
            floor_count: floor_count as i32,
            spawn_every: spawn_every.max(1),
            walk_ticks:  (15, 60),
            next_id:     0,
            passengers:  BTreeMap::new(),
            spawned:     0,
            delivered:   0,
        }
    }

    /// Passengers still in the building.
    pub fn active(&self) -> usize {
        self.passengers.len()
    }

    /// Everything the crowd does before a tick runs.
    pub fn before_tick<L: FloorLayout>(&mut self, sim: &mut Sim<L>, now: Tick) {
        self.finish_walks(now);
        if now.0.is_multiple_of(self.spawn_every) {
            self.spawn(sim);
        }
        self.board(sim, now);
        self.recall(sim);
    }

    /// `riders` were let out of `car`; start their walk out.
    pub fn alight(&mut self, car: CarId, riders: &[PassengerId], now: Tick) {
        for p in riders {
            let walk = self.walk();
            if let Some(passenger) = self.passengers.get_mut(p) {
                passenger.stage = Stage::Alighting { car, until: Tick(now.0 + walk) };
            }
        }
    }

    fn walk(&mut self) -> u64 {
        let (lo, hi) = self.walk_ticks;
        self.rng.gen_range(lo..=hi)
    }

    fn random_car(&mut self) -> Option<CarId> {
        self.rng.choose(&self.cars).copied()
    }

    fn finish_walks(&mut self, now: Tick) {
        let mut arrived = Vec::new();
        for (&id, p) in self.passengers.iter_mut() {
            match p.stage {
                Stage::Boarding { car, until } if until <= now => p.stage = Stage::Riding { car },
                Stage::Alighting { until, .. } if until <= now => arrived.push(id),
                _ => {}
            }
        }
        for id in arrived {
            self.passengers.remove(&id);
            self.delivered += 1;
            debug!("{id} reached its floor");
        }
    }

    fn spawn<L: FloorLayout>(&mut self, sim: &mut Sim<L>) {
        if self.floor_count < 2 {
            return;
        }
        let origin = self.rng.gen_range(0..self.floor_count);
        let target = (origin + self.rng.gen_range(1..self.floor_count)) % self.floor_count;
        let id = PassengerId(self.next_id);
        if !sim.add_waiting(origin, id) {
            return;
        }
        self.next_id += 1;
        self.spawned += 1;
        self.passengers.insert(id, Passenger { origin, target, stage: Stage::Waiting });
        if let Some(car) = self.random_car() {
            sim.call_elevator(car, origin);
        }
    }

    /// Walk waiting passengers into a car that has opened for them.
    fn board<L: FloorLayout>(&mut self, sim: &mut Sim<L>, now: Tick) {
        let waiting: Vec<(PassengerId, i32, i32)> = self.passengers
            .iter()
            .filter(|(_, p)| p.stage == Stage::Waiting)
            .map(|(&id, p)| (id, p.origin, p.target))
            .collect();

        for (id, origin, target) in waiting {
            let wanted = Direction::between(origin, target);
            let Some(car) = sim.registry.boarding_car(origin, wanted) else {
                continue;
            };
            if sim.board(car, origin, id, vec![target]) {
                let until = Tick(now.0 + self.walk());
                if let Some(p) = self.passengers.get_mut(&id) {
                    p.stage = Stage::Boarding { car, until };
                }
            }
        }
    }

    /// Call again for passengers whose lamp went out without them boarding.
    fn recall<L: FloorLayout>(&mut self, sim: &mut Sim<L>) {
        let stranded: Vec<i32> = self.passengers
            .values()
            .filter(|p| p.stage == Stage::Waiting)
            .map(|p| p.origin)
            .filter(|&f| {
                sim.building.floor(f).is_some_and(|floor| !floor.is_call_lit())
                    && !sim.has_elevator(f, Direction::Both)
            })
            .collect();
        for floor in stranded {
            if let Some(car) = self.random_car() {
                sim.call_elevator(car, floor);
            }
        }
    }
}

impl PassengerProbe for Crowd {
    fn is_inside(&self, car: CarId, passenger: PassengerId) -> bool {
        match self.passengers.get(&passenger).map(|p| p.stage) {
            Some(Stage::Riding { car: c }) | Some(Stage::Alighting { car: c, .. }) => c == car,
            _ => false,
        }
    }

    fn is_gone(&self, passenger: PassengerId) -> bool {
        !self.passengers.contains_key(&passenger)
    }
}
