pub mod dashboard;
pub mod health;
pub mod pages;
pub mod results;
