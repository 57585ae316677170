pub mod aircraft;
pub mod airport;
pub mod airspace;
pub mod flight_plan;
pub mod personality;
pub mod sector;
