//! Token entity and the static token registry

use serde::Serialize;

/// A token offered in the selector. The native asset has an empty address.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TokenDescriptor {
    pub name: &'static str,
    pub symbol: &'static str,
    pub logo: &'static str,
    pub address: &'static str,
}

impl TokenDescriptor {
    pub fn is_native(&self) -> bool {
        self.address.is_empty()
    }
}

static TOKEN_LIST: [TokenDescriptor; 3] = [
    TokenDescriptor {
        name: "SOL",
        symbol: "SOL",
        logo: "/assets/solana-sol-logo.png",
        address: "",
    },
    TokenDescriptor {
        name: "USDT",
        symbol: "USDT",
        logo: "/assets/tether-usdt-logo.png",
        address: "BHyC1j4XXzgiTEzQM6wJP7nVLrsQiUeDNCTXs3Nwzvay",
    },
    TokenDescriptor {
        name: "BONK",
        symbol: "$BONK",
        logo: "/assets/bonk-logo.png",
        address: "8Tc5q5jzZa2jWGsJSZ8NBvEdNw7siR7tavgKwJdje35w",
    },
];

/// Known tokens in selector order; the first entry is the native asset
pub fn token_list() -> &'static [TokenDescriptor] {
    &TOKEN_LIST
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::utils::parse_address;

    #[test]
    fn test_registry_order() {
        let symbols: Vec<_> = token_list().iter().map(|t| t.symbol).collect();
        assert_eq!(symbols, vec!["SOL", "USDT", "$BONK"]);
    }

    #[test]
    fn test_only_first_entry_is_native() {
        assert!(token_list()[0].is_native());
        assert_eq!(token_list().iter().filter(|t| t.is_native()).count(), 1);
    }

    #[test]
    fn test_every_token_address_parses() {
        for token in token_list().iter().filter(|t| !t.is_native()) {
            assert!(parse_address(token.address).is_ok(), "{} must parse", token.symbol);
        }
    }
}
