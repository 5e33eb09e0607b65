pub mod adapter;
pub mod badges;
pub mod corpus;
pub mod error;
pub mod halal;
pub mod hotel;
pub mod image;
pub mod liteapi;
pub mod liteapi_types;
pub mod rates;
pub mod scoring;
pub mod search;
pub mod text;
