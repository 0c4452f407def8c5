pub mod ledger;
pub mod seeding;
