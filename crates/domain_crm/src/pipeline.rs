//! Pipeline aggregation for the kanban header

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{percentage, Currency, Money, MoneyError};

use crate::deal::{Deal, DealStage};

/// Count and total value of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTotal {
    pub stage: DealStage,
    pub count: usize,
    pub value: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    /// One entry per stage in board order, empty stages included
    pub stages: Vec<StageTotal>,
    pub open_value: Money,
    /// Sum of value x probability over open deals
    pub weighted_forecast: Money,
    pub won_value: Money,
    /// Won deals over all closed deals; `None` until something closes
    pub win_rate: Option<Decimal>,
}

impl PipelineSummary {
    /// Summarizes `deals`, all of which must be in `currency`
    pub fn from_deals(deals: &[Deal], currency: Currency) -> Result<Self, MoneyError> {
        if let Some(foreign) = deals.iter().find(|d| d.value.currency() != currency) {
            return Err(MoneyError::CurrencyMismatch(
                currency.to_string(),
                foreign.value.currency().to_string(),
            ));
        }

        let stages = DealStage::ALL
            .into_iter()
            .map(|stage| {
                let in_stage = deals.iter().filter(|d| d.stage == stage);
                let (count, value) = in_stage.fold((0, Decimal::ZERO), |(count, sum), d| {
                    (count + 1, sum + d.value.amount())
                });
                StageTotal {
                    stage,
                    count,
                    value: Money::new(value, currency),
                }
            })
            .collect();

        let open: Vec<&Deal> = deals.iter().filter(|d| d.is_open()).collect();
        let open_value: Decimal = open.iter().map(|d| d.value.amount()).sum();
        let weighted: Decimal = open.iter().map(|d| d.weighted_value().amount()).sum();

        let won: Vec<&Deal> = deals
            .iter()
            .filter(|d| d.stage == DealStage::FechadoGanho)
            .collect();
        let closed = deals.iter().filter(|d| d.stage.is_closed()).count();

        Ok(Self {
            stages,
            open_value: Money::new(open_value, currency),
            weighted_forecast: Money::new(weighted, currency),
            won_value: Money::new(won.iter().map(|d| d.value.amount()).sum(), currency),
            win_rate: percentage(Decimal::from(won.len()), Decimal::from(closed)),
        })
    }

    pub fn stage(&self, stage: DealStage) -> Option<&StageTotal> {
        self.stages.iter().find(|s| s.stage == stage)
    }
}
