pub mod model;
pub mod predictor;
pub mod store;

pub use model::InferenceError;
pub use store::ModelStore;
