use anyhow::{anyhow, Context, Result};

/// Accepts "0x"-prefixed hex or plain decimal.
pub fn parse_seed(seed: &str) -> Result<u32> {
    let s = seed.trim();
    if s.is_empty() {
        return Err(anyhow!("empty seed"));
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).with_context(|| format!("invalid hex seed: {s}"))
    } else {
        s.parse::<u32>()
            .with_context(|| format!("invalid decimal seed: {s}"))
    }
}

pub fn seed_to_hex(seed: u32) -> String {
    format!("0x{seed:08x}")
}

pub fn parse_seed_csv(input: &str) -> Result<Vec<u32>> {
    let mut seeds = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        seeds.push(parse_seed(token)?);
    }
    if seeds.is_empty() {
        return Err(anyhow!("no seeds parsed from --seeds"));
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_decimal_seeds() {
        assert_eq!(parse_seed("0xDEADBEEF").unwrap(), 0xDEAD_BEEF);
        assert_eq!(parse_seed("0X10").unwrap(), 16);
        assert_eq!(parse_seed(" 42 ").unwrap(), 42);
        assert!(parse_seed("").is_err());
        assert!(parse_seed("0xZZ").is_err());
    }

    #[test]
    fn seed_hex_round_trips() {
        let hex = seed_to_hex(0xA57E_0001);
        assert_eq!(hex, "0xa57e0001");
        assert_eq!(parse_seed(&hex).unwrap(), 0xA57E_0001);
    }

    #[test]
    fn csv_skips_blanks_and_rejects_empty_lists() {
        let seeds = parse_seed_csv("1, 0x2, ,3").unwrap();
        assert_eq!(seeds, vec![1, 2, 3]);
        assert!(parse_seed_csv(" , ").is_err());
    }
}
