use statekit::Slice;

pub const NAME: &str = "counter";

pub fn slice() -> Slice<i64> {
    Slice::new(NAME, 0)
        .case("increment", |count, _| *count += 1)
        .case("decrement", |count, _| *count -= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_cases() {
        let counter = slice();
        let up = counter.reduce(&0, &counter.action("increment"));
        assert_eq!(up, Some(1));
        assert_eq!(counter.reduce(&1, &counter.action("decrement")), Some(0));
        assert_eq!(counter.reduce(&1, &counter.action("reset")), None);
    }
}
