pub mod roboflow_client;

pub use roboflow_client::RoboflowClient;
