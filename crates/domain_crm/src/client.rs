//! Client records
//!
//! A client carries its commercial history (stored LTV, last purchase) and
//! internal working data: the current contract, delivered projects, and an
//! onboarding checklist. Classification is derived by
//! [`analyze_client`](crate::analysis::analyze_client) and never stored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{percentage, ClientId, CoreError, Currency, Money};

use crate::error::CrmError;

/// Commercial status set by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    #[default]
    Ativo,
    Inativo,
    /// Not a client yet
    Prospect,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Ativo => "ativo",
            ClientStatus::Inativo => "inativo",
            ClientStatus::Prospect => "prospect",
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ativo" => Ok(ClientStatus::Ativo),
            "inativo" => Ok(ClientStatus::Inativo),
            "prospect" => Ok(ClientStatus::Prospect),
            other => Err(CoreError::unknown_variant("client status", other)),
        }
    }
}

/// Current service contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub monthly_value: Option<Money>,
}

impl Contract {
    /// True when `today` falls within the contract term
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.start_date <= today && self.end_date.map_or(true, |end| today <= end)
    }
}

/// A delivered or ongoing project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub value: Option<Money>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: None,
            value: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn worth(mut self, value: Money) -> Self {
        self.value = Some(value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub label: String,
    pub done: bool,
}

/// Working data kept alongside the client record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InternalData {
    pub contract: Option<Contract>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    pub notes: Option<String>,
}

/// A CRM client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: ClientStatus,
    pub tags: Vec<String>,
    /// Lifetime value as last recorded; superseded by attributed revenues
    pub ltv: Money,
    pub created_at: NaiveDate,
    pub last_purchase_date: Option<NaiveDate>,
    pub internal: InternalData,
}

impl Client {
    /// Creates an active client with no history
    ///
    /// # Errors
    ///
    /// Returns `CrmError::MissingField` if the name is blank
    pub fn new(name: impl Into<String>, created_at: NaiveDate) -> Result<Self, CrmError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CrmError::MissingField("name"));
        }
        Ok(Self {
            id: ClientId::new_v7(),
            name,
            email: None,
            phone: None,
            status: ClientStatus::default(),
            tags: Vec::new(),
            ltv: Money::zero(Currency::default()),
            created_at,
            last_purchase_date: None,
            internal: InternalData::default(),
        })
    }

    /// # Errors
    ///
    /// Returns `CrmError::MissingField` if the new name is blank
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), CrmError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CrmError::MissingField("name"));
        }
        self.name = name;
        Ok(())
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_status(mut self, status: ClientStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_ltv(mut self, ltv: Money) -> Self {
        self.ltv = ltv;
        self
    }

    pub fn with_last_purchase(mut self, date: NaiveDate) -> Self {
        self.last_purchase_date = Some(date);
        self
    }

    pub fn with_contract(mut self, contract: Contract) -> Self {
        self.internal.contract = Some(contract);
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.internal.projects.push(project);
        self
    }

    /// Adds a tag, ignoring blanks and case-insensitive duplicates
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.add_tag(tag);
        self
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into().trim().to_string();
        if tag.is_empty() || self.tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| !t.eq_ignore_ascii_case(tag));
        self.tags.len() != before
    }

    pub fn project_count(&self) -> usize {
        self.internal.projects.len()
    }

    pub fn add_checklist_item(&mut self, label: impl Into<String>) {
        self.internal.checklist.push(ChecklistItem {
            label: label.into(),
            done: false,
        });
    }

    /// Flips one checklist item and returns its new state
    pub fn toggle_checklist_item(&mut self, index: usize) -> Result<bool, CrmError> {
        let item = self
            .internal
            .checklist
            .get_mut(index)
            .ok_or(CrmError::ChecklistIndex(index))?;
        item.done = !item.done;
        Ok(item.done)
    }

    /// Percentage of checklist items done; `None` for an empty checklist
    pub fn checklist_completion(&self) -> Option<Decimal> {
        let checklist = &self.internal.checklist;
        let done = checklist.iter().filter(|i| i.done).count();
        percentage(Decimal::from(done), Decimal::from(checklist.len()))
    }
}
