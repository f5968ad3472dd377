// Application layer: wires configuration to concrete adapters and the scheduler.

pub mod assembly;
