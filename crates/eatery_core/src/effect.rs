#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchListing,
    FetchMenu { ticket: crate::MenuTicket },
}
