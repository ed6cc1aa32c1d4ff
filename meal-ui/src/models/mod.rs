mod summary;

pub use summary::ConfirmationSummary;
