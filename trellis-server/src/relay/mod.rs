mod relay;

pub use relay::SignalingRelay;
