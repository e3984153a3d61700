use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// The kind of lease segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// A lease signed with a brand-new tenant.
    New,
    /// A renewal signed with the sitting tenant.
    Renewal,
}

/// Itemized turnover cost estimate for preparing the property between
/// tenants. The per-item amounts sum to the segment's `move_out_costs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct MoveOutDetails {
    pub cleaning: Decimal,
    pub carpet: Decimal,
    pub rekey: Decimal,
    pub other: Decimal,
}

impl MoveOutDetails {
    /// Total turnover cost across all line items.
    pub fn total(&self) -> Decimal {
        self.cleaning + self.carpet + self.rekey + self.other
    }

    /// Default estimate used for new-tenant segments.
    pub fn new_tenant_default() -> Self {
        Self {
            cleaning: Decimal::new(250, 0),
            carpet: Decimal::new(200, 0),
            rekey: Decimal::new(100, 0),
            other: Decimal::ZERO,
        }
    }
}

/// A contiguous occupancy period with its own rent and fee terms.
///
/// `start_month` is a 1-based month index relative to the analysis window,
/// not a calendar month. Segments are kept in array order; when two segments
/// claim the same month, the first one in the array wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LeaseSegment {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    /// 1-based month the lease starts in, relative to the analysis window.
    #[validate(range(min = 1))]
    pub start_month: u32,
    /// Lease length in months.
    #[validate(range(min = 1))]
    pub duration: u32,
    /// Whether the one-time marketing/photo fee applies. Only meaningful for
    /// new-tenant segments.
    #[serde(default)]
    pub marketing_fee: bool,
    /// Monthly rent collected while this segment is active.
    pub rent: Decimal,
    /// Turnover cost billed the month after this segment ends.
    #[serde(default)]
    pub move_out_costs: Decimal,
    #[serde(default)]
    pub move_out_details: MoveOutDetails,
}

impl LeaseSegment {
    /// First month index after the segment (exclusive end).
    pub fn end_exclusive(&self) -> u32 {
        self.start_month + self.duration
    }

    /// Last month index the segment occupies.
    pub fn last_month(&self) -> u32 {
        self.start_month + self.duration - 1
    }

    /// Whether the given 1-based month falls inside this segment.
    pub fn contains(&self, month: u32) -> bool {
        month >= self.start_month && month < self.end_exclusive()
    }

    /// Whether this segment begins in the given month.
    pub fn starts_at(&self, month: u32) -> bool {
        month == self.start_month
    }

    /// Whether this segment's final month is the given month.
    pub fn ends_at(&self, month: u32) -> bool {
        month == self.last_month()
    }

    /// Whether the tenant moved out right before the given month, i.e. the
    /// segment ended in month `month - 1`.
    pub fn vacated_before(&self, month: u32) -> bool {
        self.end_exclusive() == month
    }

    /// Renewal terms following `previous`: starts the month after the
    /// previous lease ends, inherits the rent, carries no marketing fee and
    /// no turnover costs.
    pub fn renewal_of(previous: &LeaseSegment, id: u64) -> Self {
        Self {
            id,
            kind: SegmentKind::Renewal,
            start_month: previous.end_exclusive(),
            duration: 12,
            marketing_fee: false,
            rent: previous.rent,
            move_out_costs: Decimal::ZERO,
            move_out_details: MoveOutDetails::default(),
        }
    }

    /// New-tenant terms following `previous`: starts after a one-month
    /// turnover gap, inherits the previous rent as the asking rent, and
    /// carries the default marketing fee and move-out estimate.
    pub fn new_tenant_after(previous: &LeaseSegment, id: u64) -> Self {
        let details = MoveOutDetails::new_tenant_default();
        Self {
            id,
            kind: SegmentKind::New,
            start_month: previous.end_exclusive() + 1,
            duration: 12,
            marketing_fee: true,
            rent: previous.rent,
            move_out_costs: details.total(),
            move_out_details: details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: u32, duration: u32) -> LeaseSegment {
        LeaseSegment {
            id: 1,
            kind: SegmentKind::New,
            start_month: start,
            duration,
            marketing_fee: true,
            rent: Decimal::new(2500, 0),
            move_out_costs: Decimal::new(550, 0),
            move_out_details: MoveOutDetails::new_tenant_default(),
        }
    }

    #[test]
    fn test_range_containment() {
        let s = segment(3, 12);
        assert!(!s.contains(2));
        assert!(s.contains(3));
        assert!(s.contains(14));
        assert!(!s.contains(15));
        assert!(s.starts_at(3));
        assert!(s.ends_at(14));
        assert!(s.vacated_before(15));
        assert!(!s.vacated_before(16));
    }

    #[test]
    fn test_renewal_follows_immediately() {
        let first = segment(1, 12);
        let renewal = LeaseSegment::renewal_of(&first, 2);
        assert_eq!(renewal.start_month, 13);
        assert_eq!(renewal.kind, SegmentKind::Renewal);
        assert_eq!(renewal.rent, first.rent);
        assert!(!renewal.marketing_fee);
        assert_eq!(renewal.move_out_costs, Decimal::ZERO);
    }

    #[test]
    fn test_new_tenant_leaves_turnover_gap() {
        let first = segment(1, 12);
        let next = LeaseSegment::new_tenant_after(&first, 2);
        assert_eq!(next.start_month, 14);
        assert_eq!(next.kind, SegmentKind::New);
        assert!(next.marketing_fee);
        assert_eq!(next.move_out_costs, Decimal::new(550, 0));
    }

    #[test]
    fn test_serializes_with_original_keys() {
        let s = segment(1, 12);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["type"], "new");
        assert!(json.get("startMonth").is_some());
        assert!(json.get("marketingFee").is_some());
        assert!(json.get("moveOutCosts").is_some());
        assert_eq!(json["moveOutDetails"]["cleaning"], "250");
    }

    #[test]
    fn test_deserializes_numeric_amounts() {
        // Snapshots written by other tooling carry plain JSON numbers.
        let json = r#"{
            "id": 7,
            "type": "renewal",
            "startMonth": 13,
            "duration": 6,
            "rent": 2600,
            "moveOutCosts": 0
        }"#;
        let s: LeaseSegment = serde_json::from_str(json).unwrap();
        assert_eq!(s.kind, SegmentKind::Renewal);
        assert_eq!(s.rent, Decimal::new(2600, 0));
        assert!(!s.marketing_fee);
        assert_eq!(s.move_out_details, MoveOutDetails::default());
    }
}
