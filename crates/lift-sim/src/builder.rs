//! Fluent builder for constructing a [`Sim`].

use log::info;

use lift_core::{CarId, Config, FloorLayout, UniformFloors};

use crate::{Building, Car, ElevatorRegistry, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<L>`].
///
/// The floor layout defaults to the uniform storeys described by
/// `[building]`; supply another with [`layout`][Self::layout].
///
/// # Example
///
/// ```rust,ignore
/// let config = load_config(path)?;
/// let mut sim = SimBuilder::new(config).build()?;
/// sim.call_elevator(CarId(0), 5);
/// sim.run(&SettledProbe, &mut NoopObserver);
/// ```
pub struct SimBuilder<L: FloorLayout> {
    config: Config,
    layout: L,
}

impl SimBuilder<UniformFloors> {
    pub fn new(config: Config) -> Self {
        let layout = config.building.layout();
        Self { config, layout }
    }
}

impl<L: FloorLayout> SimBuilder<L> {
    /// Replace the floor layout.
    pub fn layout<M: FloorLayout>(self, layout: M) -> SimBuilder<M> {
        SimBuilder { config: self.config, layout }
    }

    /// Validate the configuration, place the cars, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<L>> {
        self.config.validate()?;

        let floor_count = self.layout.floor_count();
        if floor_count < 2 {
            return Err(SimError::Config(format!(
                "layout has {floor_count} floor(s); at least 2 are required"
            )));
        }

        // ── Cars ──────────────────────────────────────────────────────────
        let mut registry = ElevatorRegistry::new();
        for (i, car_cfg) in self.config.cars.iter().enumerate() {
            let id = CarId::try_from(i)
                .map_err(|_| SimError::Config(format!("too many cars ({})", self.config.cars.len())))?;
            registry.register(Car::new(id, car_cfg, &self.config.doors, &self.layout)?)?;
        }

        // ── Floors and entrances ──────────────────────────────────────────
        let building = Building::new(
            self.layout,
            self.config.building.floor_capacity,
            &self.config.doors,
            &registry.ids(),
        );

        info!("built {} car(s) over {} floor(s)", registry.len(), floor_count);

        Ok(Sim {
            clock: self.config.sim.make_clock(),
            config: self.config,
            building,
            registry,
        })
    }
}
