/// REST endpoint коллекции
pub const ENDPOINT: &str = "/api/sim-cards";
