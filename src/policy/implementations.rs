// src/policy/implementations.rs

use crate::error::PolicyError;
use crate::model::ledger::Ledger;
use crate::policy::traits::PurchasePolicy;

fn validate_common(lead_time: usize, mean_demand: f64) -> Result<(), PolicyError> {
    if lead_time == 0 {
        return Err(PolicyError::ZeroLeadTime);
    }
    if mean_demand <= 0.0 || !mean_demand.is_finite() {
        return Err(PolicyError::NonPositiveDemand(mean_demand));
    }
    Ok(())
}

// =========================================================================
// 1. ROP (Continuous Review / Reorder Point)
// =========================================================================

/// Orders a fixed lot of one lead time's worth of demand whenever on-hand
/// inventory drops to the reorder point.
///
/// `safety_stock = ceil(mean) × lead_time`,
/// `reorder_point = mean × lead_time + safety_stock`.
#[derive(Debug, Clone)]
pub struct PurchaseRop {
    lead_time: usize,
    average_daily_demand: f64,
    safety_stock: f64,
    reorder_point: f64,
}

impl PurchaseRop {
    pub fn new(lead_time: usize, average_daily_demand: f64) -> Result<Self, PolicyError> {
        validate_common(lead_time, average_daily_demand)?;

        let safety_stock = average_daily_demand.ceil() * lead_time as f64;
        let reorder_point = average_daily_demand * lead_time as f64 + safety_stock;

        Ok(Self {
            lead_time,
            average_daily_demand,
            safety_stock,
            reorder_point,
        })
    }

    fn order_quantity(&self) -> u64 {
        (self.average_daily_demand * self.lead_time as f64).ceil() as u64
    }
}

impl PurchasePolicy for PurchaseRop {
    fn get_purchase(&self, ledger: &Ledger, day: usize) -> u64 {
        let current_inventory = ledger.inventory[day];
        if (current_inventory as f64) <= self.reorder_point {
            self.order_quantity()
        } else {
            0
        }
    }

    fn name(&self) -> &'static str {
        "ROP"
    }

    fn calculation_details(&self, ledger: &Ledger, day: usize) -> String {
        let current_inventory = ledger.inventory[day];
        let triggered = (current_inventory as f64) <= self.reorder_point;
        format!(
            "ROP = LT×D + SS = {}×{} + {} = {}\nINV = {} {} {} → Order = {}",
            self.lead_time,
            self.average_daily_demand,
            self.safety_stock,
            self.reorder_point,
            current_inventory,
            if triggered { "≤" } else { ">" },
            self.reorder_point,
            if triggered { self.order_quantity() } else { 0 },
        )
    }
}

// =========================================================================
// 2. EOQ (Economic Order Quantity)
// =========================================================================

/// Orders the economic lot size whenever the inventory position (on-hand
/// plus pipeline) drops to the reorder point.
///
/// `eoq = sqrt(2 × annual_demand × ordering_cost / holding_cost_rate)`,
/// computed once at construction.
#[derive(Debug, Clone)]
pub struct PurchaseEoq {
    lead_time: usize,
    average_daily_demand: f64,
    ordering_cost: f64,
    holding_cost_rate: f64,
    eoq: f64,
    reorder_point: f64,
}

impl PurchaseEoq {
    pub fn new(
        lead_time: usize,
        average_daily_demand: f64,
        ordering_cost: f64,
        holding_cost_rate: f64,
    ) -> Result<Self, PolicyError> {
        validate_common(lead_time, average_daily_demand)?;
        if ordering_cost <= 0.0 || !ordering_cost.is_finite() {
            return Err(PolicyError::NonPositiveOrderingCost(ordering_cost));
        }
        if holding_cost_rate <= 0.0 || !holding_cost_rate.is_finite() {
            return Err(PolicyError::NonPositiveHoldingCostRate(holding_cost_rate));
        }

        let annual_demand = average_daily_demand * 365.0;
        let eoq = (2.0 * annual_demand * ordering_cost / holding_cost_rate).sqrt();

        // 50% safety factor on lead-time demand.
        let lead_time_demand = average_daily_demand * lead_time as f64;
        let reorder_point = lead_time_demand + (lead_time_demand * 0.5).ceil();

        Ok(Self {
            lead_time,
            average_daily_demand,
            ordering_cost,
            holding_cost_rate,
            eoq,
            reorder_point,
        })
    }

    /// The computed economic order quantity, before rounding up to units.
    pub fn eoq(&self) -> f64 {
        self.eoq
    }

    fn inventory_position(&self, ledger: &Ledger, day: usize) -> u64 {
        ledger.inventory[day] + ledger.pipeline_inventory(day, self.lead_time)
    }
}

impl PurchasePolicy for PurchaseEoq {
    fn get_purchase(&self, ledger: &Ledger, day: usize) -> u64 {
        let inventory_position = self.inventory_position(ledger, day);
        if (inventory_position as f64) <= self.reorder_point {
            self.eoq.ceil() as u64
        } else {
            0
        }
    }

    fn name(&self) -> &'static str {
        "EOQ"
    }

    fn calculation_details(&self, ledger: &Ledger, day: usize) -> String {
        let on_hand = ledger.inventory[day];
        let pipeline = ledger.pipeline_inventory(day, self.lead_time);
        let inventory_position = on_hand + pipeline;
        let triggered = (inventory_position as f64) <= self.reorder_point;
        format!(
            "EOQ = sqrt((2×D×S)/H) = sqrt((2×{}×{})/{}) = {:.1}\n\
             ROP = LT×D + SS = {}×{} + {} = {}\n\
             INV = I + P = {} + {} = {} {} {} → Order = {}",
            self.average_daily_demand * 365.0,
            self.ordering_cost,
            self.holding_cost_rate,
            self.eoq,
            self.lead_time,
            self.average_daily_demand,
            self.reorder_point - self.average_daily_demand * self.lead_time as f64,
            self.reorder_point,
            on_hand,
            pipeline,
            inventory_position,
            if triggered { "≤" } else { ">" },
            self.reorder_point,
            if triggered { self.eoq.ceil() as u64 } else { 0 },
        )
    }
}

// =========================================================================
// 3. TPOP (Periodic Review / Target Level)
// =========================================================================

/// Reviews inventory every `review_period` days and orders up to a target
/// level covering the protection interval (review period + lead time).
#[derive(Debug, Clone)]
pub struct PurchaseTpop {
    lead_time: usize,
    average_daily_demand: f64,
    review_period: usize,
    target_level: f64,
}

impl PurchaseTpop {
    pub fn new(
        lead_time: usize,
        average_daily_demand: f64,
        review_period: usize,
    ) -> Result<Self, PolicyError> {
        validate_common(lead_time, average_daily_demand)?;
        if review_period == 0 {
            return Err(PolicyError::ZeroReviewPeriod);
        }

        let protection_interval = (review_period + lead_time) as f64;
        let expected_demand = average_daily_demand * protection_interval;
        let safety_stock = (average_daily_demand * protection_interval.sqrt()).ceil();
        let target_level = expected_demand + safety_stock;

        Ok(Self {
            lead_time,
            average_daily_demand,
            review_period,
            target_level,
        })
    }

    fn is_review_day(&self, day: usize) -> bool {
        day % self.review_period == 0
    }

    fn inventory_position(&self, ledger: &Ledger, day: usize) -> u64 {
        ledger.inventory[day] + ledger.pipeline_inventory(day, self.lead_time)
    }
}

impl PurchasePolicy for PurchaseTpop {
    fn get_purchase(&self, ledger: &Ledger, day: usize) -> u64 {
        if !self.is_review_day(day) {
            return 0;
        }

        let inventory_position = self.inventory_position(ledger, day) as f64;
        let shortfall = (self.target_level - inventory_position).ceil();
        if shortfall > 0.0 {
            shortfall as u64
        } else {
            0
        }
    }

    fn name(&self) -> &'static str {
        "TPOP"
    }

    fn calculation_details(&self, ledger: &Ledger, day: usize) -> String {
        if !self.is_review_day(day) {
            return format!(
                "Day {} is not a review day (period = {}) → Order = 0",
                day, self.review_period
            );
        }
        let on_hand = ledger.inventory[day];
        let pipeline = ledger.pipeline_inventory(day, self.lead_time);
        let inventory_position = on_hand + pipeline;
        let order = self.get_purchase(ledger, day);
        format!(
            "T = D×(R+LT) + SS = {}×{} + {} = {}\n\
             INV = I + P = {} + {} = {} → Order = max(0, ceil(T − INV)) = {}",
            self.average_daily_demand,
            self.review_period + self.lead_time,
            self.target_level - self.average_daily_demand * (self.review_period + self.lead_time) as f64,
            self.target_level,
            on_hand,
            pipeline,
            inventory_position,
            order,
        )
    }
}
