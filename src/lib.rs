pub mod body;
pub mod c_api;
pub mod collision;
pub mod config;
pub mod error;
pub mod events;
pub mod forces;
pub mod simulation;
pub mod stepper;
pub mod utils;
pub mod vector;

pub use body::{Body, BodyId};
pub use collision::Merge;
pub use config::{EngineConfig, G};
pub use error::{EngineError, Result};
pub use events::{Event, EventLog, SimulationEvents};
pub use forces::ForceField;
pub use simulation::SimulationEngine;
pub use stepper::{StepController, Trial};
pub use vector::Vector2;
