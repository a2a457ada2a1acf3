mod boundaries;
mod canonical;
mod collision;
mod traits;
