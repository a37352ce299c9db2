pub mod class_balancer;
pub mod multilabel_encoder;
