pub mod prompts;
pub mod templates;

#[cfg(test)]
pub mod test_helpers;
