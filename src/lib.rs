pub mod engine;
pub mod importer;
pub mod pose;
pub mod rig;
