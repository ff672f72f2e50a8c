//! Demo entity operated by the CLI.

use filestore_core::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

impl Entity for Project {
    type Id = String;
    const ENTITY_NAME: &'static str = "projects";

    fn id(&self) -> &String {
        &self.id
    }
}
