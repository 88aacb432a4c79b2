use serde::{Deserialize, Serialize};

use super::{Pagination, PersonnelStatus};

/// A staff member who can be assigned to projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Personnel {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub position: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub status: PersonnelStatus,
}

/// `data` of the personnel list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonnelPage {
    #[serde(default)]
    pub personnel: Vec<Personnel>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Create/update body; unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonnelForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PersonnelStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_personnel() {
        let json = r#"{"personnel":[
            {"id":1,"name":"Marta","email":"marta@example.com","position":"Backend","status":"inactive"},
            {"id":2,"name":"Jon","email":"jon@example.com"}
        ],"pagination":{"last_page":2}}"#;
        let page: PersonnelPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.personnel[0].status, PersonnelStatus::Inactive);
        // Missing status defaults to active
        assert_eq!(page.personnel[1].status, PersonnelStatus::Active);
        assert_eq!(page.pagination.last_page, 2);
    }
}
