use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One stored entry. Kept generic so foreign or hand-edited records survive a rewrite.
pub type Record = Value;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: u64,
    pub employee_name: String,
    pub employee_id: String,
    pub designation_name: String,
    pub office_name: String,
    pub division_name: String,
    pub section_name: String,
    pub cadre_title: String,
    pub mode_of_joining: String,
    pub category_title: String,
    pub date_of_birth: Value,
    pub updated_on: String,
    #[serde(rename = "transferDetails")]
    pub transfer_details: Vec<Value>,
    #[serde(rename = "careerGrowth")]
    pub career_growth: Vec<Value>,
    pub learning: Vec<Value>,
}

/// Which store a read was served from or a write landed in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    #[serde(rename = "project")]
    Persistent,
    #[serde(rename = "tmp")]
    Ephemeral,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WriteMeta {
    pub target: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl WriteMeta {
    pub fn degraded(&self) -> bool {
        self.target == Location::Ephemeral
    }
}

#[derive(Serialize, Debug)]
pub struct CreatedEmployee {
    pub employee: Employee,
    #[serde(rename = "writeMeta")]
    pub write_meta: WriteMeta,
}
