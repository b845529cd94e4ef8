//! Employee share of statutory social insurance.
//!
//! | Branch | Base | Employee rate |
//! |--------|------|---------------|
//! | RV (pension) | `min(gross, bbg_rv_av)` | `rv_total / 2` |
//! | AV (unemployment) | `min(gross, bbg_rv_av)` | `av_total / 2` |
//! | KV (health) | `min(gross, bbg_kv_pv)` | `(kv_general + kv_add_on) / 2`, public only |
//! | PV (care) | `min(gross, bbg_kv_pv)` | `pv_total / 2` + childless surcharge, public only |
//!
//! Privately insured employees pay no statutory KV/PV; their premium is
//! handled at the net aggregation step.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{HealthType, RateTable, SocialContributions, SocialNote};

/// Calculator for monthly employee social contributions.
#[derive(Debug, Clone)]
pub struct SocialContributionWorksheet<'a> {
    rates: &'a RateTable,
}

impl<'a> SocialContributionWorksheet<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Calculates all four branches for one month.
    ///
    /// `gross_monthly` must already be clamped. `children_count` is the
    /// rounded-up children allowance; zero triggers the childless care
    /// surcharge. Age is not modeled, so the surcharge assumes 23+.
    /// `premium_deducted` only selects the note for private insurance.
    pub fn calculate(
        &self,
        gross_monthly: Decimal,
        health_type: HealthType,
        children_count: u32,
        premium_deducted: bool,
    ) -> SocialContributions {
        let pension_base = self.pension_base(gross_monthly);
        let health_base = self.health_base(gross_monthly);

        let rv = self.employee_share(pension_base, self.rates.rv_total);
        let av = self.employee_share(pension_base, self.rates.av_total);
        let (kv, pv) = match health_type {
            HealthType::Public => (
                self.health_contribution(health_base),
                self.care_contribution(health_base, children_count),
            ),
            HealthType::Private => (Decimal::ZERO, Decimal::ZERO),
        };

        let total = rv + av + kv + pv;
        debug!(%rv, %av, %kv, %pv, %total, "social contributions");

        SocialContributions {
            rv,
            av,
            kv,
            pv,
            total,
            note: self.note(health_type, children_count, premium_deducted),
        }
    }

    /// Contribution base for pension and unemployment insurance.
    fn pension_base(
        &self,
        gross_monthly: Decimal,
    ) -> Decimal {
        gross_monthly.min(self.rates.bbg_rv_av_monthly)
    }

    /// Contribution base for health and care insurance.
    fn health_base(
        &self,
        gross_monthly: Decimal,
    ) -> Decimal {
        gross_monthly.min(self.rates.bbg_kv_pv_monthly)
    }

    /// Half of the total rate, paid by the employee.
    fn employee_share(
        &self,
        base: Decimal,
        total_rate: Decimal,
    ) -> Decimal {
        base * (total_rate / Decimal::TWO)
    }

    fn health_contribution(
        &self,
        base: Decimal,
    ) -> Decimal {
        self.employee_share(
            base,
            self.rates.kv_general_total + self.rates.kv_add_on_avg_total,
        )
    }

    fn care_contribution(
        &self,
        base: Decimal,
        children_count: u32,
    ) -> Decimal {
        let share = self.employee_share(base, self.rates.pv_total);
        if children_count == 0 {
            share + base * self.rates.pv_childless_surcharge
        } else {
            share
        }
    }

    fn note(
        &self,
        health_type: HealthType,
        children_count: u32,
        premium_deducted: bool,
    ) -> SocialNote {
        match (health_type, children_count, premium_deducted) {
            (HealthType::Private, _, true) => SocialNote::PrivatePremiumDeducted,
            (HealthType::Private, _, false) => SocialNote::PrivatePremiumExcluded,
            (HealthType::Public, 0, _) => SocialNote::ChildlessSurchargeApplied,
            (HealthType::Public, _, _) => SocialNote::ChildlessSurchargeWaived,
        }
    }
}
