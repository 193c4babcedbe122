pub mod todo;

#[cfg(test)]
mod test_util;
