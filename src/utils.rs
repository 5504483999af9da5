pub mod token;
pub mod stats;
pub mod printing;

use serde_json::{Map, Value};

pub type JsonMap = Map<String, Value>;
