pub mod catalog;
pub mod emi;
pub mod evaluate;
pub mod risk;
