use crate::error::ShoplistError;

pub type ShoplistResult<T> = Result<T, ShoplistError>;
