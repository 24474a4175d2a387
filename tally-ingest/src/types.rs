/// Where each semantic column sits in a statement header.
///
/// `None` means the header had no matching cell; such a slot is never read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub debit: Option<usize>,
    pub credit: Option<usize>,
    /// Only populated when neither debit nor credit exists
    pub amount: Option<usize>,
}

/// How a statement encodes money direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountLayout {
    /// Separate debit and/or credit columns, each holding a magnitude
    DebitCredit,
    /// One signed amount column (or none at all)
    Signed,
}

impl ColumnMap {
    pub fn layout(&self) -> AmountLayout {
        if self.debit.is_some() || self.credit.is_some() {
            AmountLayout::DebitCredit
        } else {
            AmountLayout::Signed
        }
    }

    /// True when no column can carry an amount
    pub fn has_no_amount(&self) -> bool {
        self.debit.is_none() && self.credit.is_none() && self.amount.is_none()
    }
}
