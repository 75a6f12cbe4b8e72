//! Room id generation.
//!
//! Room ids are short 3-digit strings so they can be read out loud across a
//! table. Uniqueness among live rooms is the registry's job; this only draws
//! a candidate.

use rand::Rng;

/// Draw a random 3-digit room id in `100..=999`.
pub fn generate_room_id() -> String {
    rand::thread_rng().gen_range(100..1000).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_ids_are_three_digits() {
        for _ in 0..100 {
            let id = generate_room_id();
            assert_eq!(id.len(), 3);
            let n: u16 = id.parse().unwrap();
            assert!((100..1000).contains(&n));
        }
    }
}
