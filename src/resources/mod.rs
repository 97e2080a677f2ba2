//! ECS resources made available to systems.
//!
//! Overview
//! - `collisionsettings` – collision configuration loaded from INI
//! - `collisionstats` – counters from the last collision pass
//! - `collisionsuppression` – timed and permanent pair suppression table
//! - `worldtime` – simulation time and delta
pub mod collisionsettings;
pub mod collisionstats;
pub mod collisionsuppression;
pub mod worldtime;
