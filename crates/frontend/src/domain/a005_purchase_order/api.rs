/// REST endpoint коллекции
pub const ENDPOINT: &str = "/api/purchase-orders";
