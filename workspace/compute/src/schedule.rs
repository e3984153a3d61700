use rust_decimal::Decimal;

/// Fee rates and flat charges applied while walking the timeline.
///
/// The defaults come from the property-management contract; tests and
/// what-if analyses can swap in their own schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeSchedule {
    /// Fraction of rent charged as the monthly management fee while occupied.
    pub management_fee_rate: Decimal,
    /// Fraction of rent charged once when a new-tenant lease starts.
    pub leasing_fee_rate: Decimal,
    /// Fraction of rent charged once when a renewal starts.
    pub renewal_fee_rate: Decimal,
    /// Flat marketing/photo fee for new-tenant leases that opted in.
    pub marketing_fee: Decimal,
    /// Flat maintenance survey fee charged in a lease's final month.
    pub maintenance_survey_fee: Decimal,
    /// Repairs above this amount incur the coordination surcharge.
    pub repair_coordination_threshold: Decimal,
    /// Fraction of the repair amount charged as the coordination surcharge.
    pub repair_coordination_rate: Decimal,
    /// HOA dues charged every month.
    pub hoa_monthly: Decimal,
    /// One-time HOA setup charge in the first month of the analysis.
    pub hoa_setup_fee: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            management_fee_rate: Decimal::new(10, 2),
            leasing_fee_rate: Decimal::new(50, 2),
            renewal_fee_rate: Decimal::new(10, 2),
            marketing_fee: Decimal::new(150, 0),
            maintenance_survey_fee: Decimal::new(100, 0),
            repair_coordination_threshold: Decimal::new(2000, 0),
            repair_coordination_rate: Decimal::new(10, 2),
            hoa_monthly: Decimal::new(240, 0),
            hoa_setup_fee: Decimal::new(150, 0),
        }
    }
}
