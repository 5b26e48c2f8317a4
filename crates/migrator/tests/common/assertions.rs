use migrator_core::{MigrationPreview, MigrationResult};

/// Common assertions for completed migrations
pub trait MigrationAssertions {
    fn assert_deposited(&self, amount_a: u128, amount_b: u128);
    fn assert_refunded(&self, refund_a: u128, refund_b: u128);
    fn assert_conserves(&self, withdrawn_a: u128, withdrawn_b: u128);
    fn assert_matches_preview(&self, preview: &MigrationPreview);
}

impl MigrationAssertions for MigrationResult {
    fn assert_deposited(&self, amount_a: u128, amount_b: u128) {
        assert_eq!(
            (self.amount_a_deposited, self.amount_b_deposited),
            (amount_a, amount_b),
            "deposited amounts (a, b)"
        );
    }

    fn assert_refunded(&self, refund_a: u128, refund_b: u128) {
        assert_eq!(
            (self.refund_a, self.refund_b),
            (refund_a, refund_b),
            "refunded amounts (a, b)"
        );
    }

    fn assert_conserves(&self, withdrawn_a: u128, withdrawn_b: u128) {
        assert_eq!(
            self.amount_a_deposited + self.refund_a,
            withdrawn_a,
            "asset A must be deposited or refunded"
        );
        assert_eq!(
            self.amount_b_deposited + self.refund_b,
            withdrawn_b,
            "asset B must be deposited or refunded"
        );
    }

    fn assert_matches_preview(&self, preview: &MigrationPreview) {
        assert_eq!(self.liquidity_minted, preview.liquidity, "liquidity");
        assert_eq!(self.amount_a_deposited, preview.amount_a_deposited, "deposit A");
        assert_eq!(self.amount_b_deposited, preview.amount_b_deposited, "deposit B");
        assert_eq!(self.refund_a, preview.refund_a, "refund A");
        assert_eq!(self.refund_b, preview.refund_b, "refund B");
    }
}
