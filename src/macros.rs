// src/macros.rs

/// `String` from anything `String: From<_>`: `s!("BCN")`, `s!(name)`, `s!()`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate string slices into a new `String`.
/// Used for snapshot names: `join!(prefix, "_")`, `join!(".", ext)`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut out = ::std::string::String::from($first);
        $( out.push_str($rest); )+
        out
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn s_and_join() {
        let ext = s!("csv");
        assert_eq!(s!(), "");
        assert_eq!(join!("aoc_rankings", "_", "20240101000000", ".", &ext), "aoc_rankings_20240101000000.csv");
    }
}
