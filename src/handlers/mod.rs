// handlers/mod.rs - HTTP handlers
//
// public: service root and health, no authentication
// jobs:   the jobs resource; reads are public, writes require an admin token
pub mod jobs;
pub mod public;
