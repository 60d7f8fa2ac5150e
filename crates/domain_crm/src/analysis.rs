//! Client relationship analysis
//!
//! Classifies a client from its purchase history into a relationship tier,
//! a recurrence potential and a health score, and suggests next actions.
//!
//! # Decision table
//!
//! | Projects | Account age | Other                      | Relationship         | Potential |
//! |----------|-------------|----------------------------|----------------------|-----------|
//! | >= 2     | > 3 months  |                            | Recorrente           | Alto      |
//! | >= 2     | <= 3 months |                            | Potencial Recorrente | Alto      |
//! | < 2      |             | LTV > 5000                 | Potencial Recorrente | Alto      |
//! | 1        |             |                            | Pontual              | Médio     |
//! | 0        |             |                            | Pontual              | Baixo     |
//!
//! Recurring clients are then checked for recency: 60 to 120 days without a
//! purchase demotes them to `Em Risco`, more than 120 days to `Inativo`.
//! Health follows the same recency, and a recurring client silent for more
//! than 180 days is `Crítico` even after the demotion to `Inativo`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::temporal::{days_between, months_between};
use core_kernel::{ClientId, Money};
use domain_ledger::Revenue;

use crate::client::Client;

/// Lifetime value above which a client is worth a recurring offer
pub const HIGH_TICKET: Decimal = dec!(5000);
pub const RECURRENT_MIN_PROJECTS: usize = 2;
/// Account age a client must exceed before counting as recurring
pub const RECURRENT_MIN_AGE_MONTHS: u32 = 3;
pub const AT_RISK_DAYS: i64 = 60;
pub const INACTIVE_DAYS: i64 = 120;
pub const CRITICAL_DAYS: i64 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relationship {
    Pontual,
    Recorrente,
    #[serde(rename = "Em Risco")]
    EmRisco,
    Inativo,
    #[serde(rename = "Potencial Recorrente")]
    PotencialRecorrente,
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relationship::Pontual => "Pontual",
            Relationship::Recorrente => "Recorrente",
            Relationship::EmRisco => "Em Risco",
            Relationship::Inativo => "Inativo",
            Relationship::PotencialRecorrente => "Potencial Recorrente",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecurrencePotential {
    Baixo,
    #[serde(rename = "Médio")]
    Medio,
    Alto,
}

impl fmt::Display for RecurrencePotential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecurrencePotential::Baixo => "Baixo",
            RecurrencePotential::Medio => "Médio",
            RecurrencePotential::Alto => "Alto",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthScore {
    #[serde(rename = "Saudável")]
    Saudavel,
    #[serde(rename = "Atenção")]
    Atencao,
    #[serde(rename = "Crítico")]
    Critico,
}

impl fmt::Display for HealthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HealthScore::Saudavel => "Saudável",
            HealthScore::Atencao => "Atenção",
            HealthScore::Critico => "Crítico",
        })
    }
}

/// Suggested next action for a client
///
/// `Display` renders the suggestion shown on the client card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    /// Recurring client drifting away
    Reengage { days: i64 },
    /// Client silent past the inactivity threshold
    WinBack { days: i64 },
    /// High-value client without a recurring arrangement
    ProposeRecurringContract,
    /// Healthy recurring client
    Upsell,
    /// One project so far
    OfferNextProject,
    /// No revenue or purchase date on record
    MissingHistory,
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insight::Reengage { days } => write!(
                f,
                "Cliente sem comprar há {} dias: agende um contato de acompanhamento",
                days
            ),
            Insight::WinBack { days } => write!(
                f,
                "Cliente inativo há {} dias: envie uma proposta de reativação",
                days
            ),
            Insight::ProposeRecurringContract => {
                f.write_str("Ticket alto: proponha um contrato recorrente")
            }
            Insight::Upsell => {
                f.write_str("Cliente saudável: ofereça serviços complementares")
            }
            Insight::OfferNextProject => {
                f.write_str("Primeiro projeto entregue: sugira um novo projeto")
            }
            Insight::MissingHistory => {
                f.write_str("Sem histórico de compras: registre as vendas deste cliente")
            }
        }
    }
}

/// Everything derived about one client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientAnalysis {
    pub client_id: ClientId,
    pub total_ltv: Money,
    /// Revenues attributed to the client
    pub matched_transactions: usize,
    pub last_purchase: Option<NaiveDate>,
    /// `None` when there is no purchase on record
    pub days_since_last_purchase: Option<i64>,
    pub account_age_months: u32,
    pub project_count: usize,
    pub relationship: Relationship,
    pub recurrence_potential: RecurrencePotential,
    pub health: HealthScore,
    pub insights: Vec<Insight>,
}

/// Classifies `client` from the revenues attributed to it
///
/// `revenues` may contain records of other clients; only those whose
/// `client_id` matches are used. When none match, the client's stored LTV
/// and last purchase date are used instead.
pub fn analyze_client(client: &Client, revenues: &[Revenue], today: NaiveDate) -> ClientAnalysis {
    let matched: Vec<&Revenue> = revenues
        .iter()
        .filter(|r| r.client_id == Some(client.id))
        .collect();

    let total_ltv = if matched.is_empty() {
        client.ltv
    } else {
        let sum: Decimal = matched.iter().map(|r| r.amount.amount()).sum();
        Money::new(sum, client.ltv.currency())
    };

    let last_purchase = matched
        .iter()
        .map(|r| r.date)
        .max()
        .or(client.last_purchase_date);
    let days_since_last_purchase = last_purchase.map(|date| days_between(date, today));
    let account_age_months = months_between(client.created_at, today);
    let project_count = client.project_count();

    let (relationship, recurrence_potential, health) = classify(
        project_count,
        account_age_months,
        total_ltv.amount(),
        days_since_last_purchase,
    );

    let insights = insights_for(
        relationship,
        recurrence_potential,
        health,
        total_ltv.amount(),
        days_since_last_purchase,
    );

    ClientAnalysis {
        client_id: client.id,
        total_ltv,
        matched_transactions: matched.len(),
        last_purchase,
        days_since_last_purchase,
        account_age_months,
        project_count,
        relationship,
        recurrence_potential,
        health,
        insights,
    }
}

fn classify(
    projects: usize,
    age_months: u32,
    ltv: Decimal,
    days_since_purchase: Option<i64>,
) -> (Relationship, RecurrencePotential, HealthScore) {
    if projects >= RECURRENT_MIN_PROJECTS && age_months > RECURRENT_MIN_AGE_MONTHS {
        let days = days_since_purchase.unwrap_or(0);
        let relationship = if days > INACTIVE_DAYS {
            Relationship::Inativo
        } else if days >= AT_RISK_DAYS {
            Relationship::EmRisco
        } else {
            Relationship::Recorrente
        };
        // Health reads recency directly so that Inativo can still turn Crítico
        let health = if days > CRITICAL_DAYS {
            HealthScore::Critico
        } else if days >= AT_RISK_DAYS {
            HealthScore::Atencao
        } else {
            HealthScore::Saudavel
        };
        return (relationship, RecurrencePotential::Alto, health);
    }

    if projects >= RECURRENT_MIN_PROJECTS || ltv > HIGH_TICKET {
        return (
            Relationship::PotencialRecorrente,
            RecurrencePotential::Alto,
            HealthScore::Saudavel,
        );
    }

    let potential = if projects == 1 {
        RecurrencePotential::Medio
    } else {
        RecurrencePotential::Baixo
    };
    (Relationship::Pontual, potential, HealthScore::Saudavel)
}

fn insights_for(
    relationship: Relationship,
    potential: RecurrencePotential,
    health: HealthScore,
    ltv: Decimal,
    days_since_purchase: Option<i64>,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    match (relationship, days_since_purchase) {
        (Relationship::EmRisco, Some(days)) => insights.push(Insight::Reengage { days }),
        (Relationship::Inativo, Some(days)) => insights.push(Insight::WinBack { days }),
        (Relationship::Recorrente, _) if health == HealthScore::Saudavel => {
            insights.push(Insight::Upsell)
        }
        (Relationship::PotencialRecorrente, _) => {
            insights.push(Insight::ProposeRecurringContract)
        }
        (Relationship::Pontual, _) if ltv > HIGH_TICKET => {
            insights.push(Insight::ProposeRecurringContract)
        }
        _ => {}
    }

    if relationship == Relationship::Pontual && potential == RecurrencePotential::Medio {
        insights.push(Insight::OfferNextProject);
    }
    if days_since_purchase.is_none() {
        insights.push(Insight::MissingHistory);
    }
    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        let recurring = |days| classify(2, 4, dec!(0), Some(days));

        assert_eq!(recurring(59).0, Relationship::Recorrente);
        assert_eq!(recurring(60).0, Relationship::EmRisco);
        assert_eq!(recurring(120).0, Relationship::EmRisco);
        assert_eq!(recurring(121).0, Relationship::Inativo);
        assert_eq!(recurring(180).2, HealthScore::Atencao);
        assert_eq!(recurring(181).2, HealthScore::Critico);
    }

    #[test]
    fn test_age_threshold_is_exclusive() {
        let (relationship, potential, _) = classify(2, 3, dec!(0), Some(10));
        assert_eq!(relationship, Relationship::PotencialRecorrente);
        assert_eq!(potential, RecurrencePotential::Alto);
    }

    #[test]
    fn test_high_ticket_is_exclusive() {
        assert_eq!(classify(1, 12, dec!(5000), Some(1)).0, Relationship::Pontual);
        assert_eq!(
            classify(1, 12, dec!(5000.01), Some(1)).0,
            Relationship::PotencialRecorrente
        );
    }

    #[test]
    fn test_labels_serialize_in_portuguese() {
        assert_eq!(
            serde_json::to_string(&Relationship::EmRisco).unwrap(),
            "\"Em Risco\""
        );
        assert_eq!(
            serde_json::to_string(&RecurrencePotential::Medio).unwrap(),
            "\"Médio\""
        );
        assert_eq!(
            serde_json::to_string(&HealthScore::Critico).unwrap(),
            "\"Crítico\""
        );
    }

    #[test]
    fn test_insight_wire_shape() {
        let json = serde_json::to_value(Insight::Reengage { days: 75 }).unwrap();
        assert_eq!(json["kind"], "reengage");
        assert_eq!(json["days"], 75);
    }
}
