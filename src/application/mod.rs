pub mod use_cases;

pub use use_cases::class_balancer::{BalancedTable, ClassBalancer};
pub use use_cases::multilabel_encoder::{EncodedTable, MultiLabelEncoder};
