pub mod athletes;
pub mod categories;
pub mod training_centers;

#[cfg(test)]
pub(crate) mod test_support;
