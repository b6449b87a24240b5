use std::{
    fmt,
    str::FromStr,
};

use crate::error::ConfigError;



macro_rules! currencies {
    ($($variant:ident => $code:literal),+ $(,)?) => {
        /// Currencies quoted by the charting endpoint.
        ///
        /// The lowercase code is what goes on the wire and into output paths.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Currency {
            $($variant),+
        }



        impl Currency {
            /// Every supported currency, in collection order.
            pub const ALL: &'static [Currency] = &[$(Currency::$variant),+];


            pub fn code(&self) -> &'static str {
                match self {
                    $(Currency::$variant => $code),+
                }
            }
        }
    }
}



currencies! {
    Usd => "usd",
    Eur => "eur",
    Gbp => "gbp",
    Chf => "chf",
    Cad => "cad",
    Aud => "aud",
    Sek => "sek",
    Nok => "nok",
    Rub => "rub",
    Thb => "thb",
    Sgd => "sgd",
    Hkd => "hkd",
    Azn => "azn",
    Amd => "amd",
    Dkk => "dkk",
    Aed => "aed",
    Jpy => "jpy",
    Try => "try",
    Cny => "cny",
    Sar => "sar",
    Inr => "inr",
    Myr => "myr",
    Afn => "afn",
    Kwd => "kwd",
    Iqd => "iqd",
    Bhd => "bhd",
    Omr => "omr",
    Qar => "qar",
}



impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}



impl FromStr for Currency {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();

        Currency::ALL.iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .copied()
            .ok_or_else(|| ConfigError::UnknownCurrency(code.to_string()))
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_full_currency_set() {
        assert_eq!(Currency::ALL.len(), 28);
        assert_eq!(Currency::ALL.first(), Some(&Currency::Usd));
        assert_eq!(Currency::ALL.last(), Some(&Currency::Qar));
    }


    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("USD".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" try ".parse::<Currency>().unwrap(), Currency::Try);
        assert!(matches!(
            "xyz".parse::<Currency>(),
            Err(ConfigError::UnknownCurrency(code)) if code == "xyz"
        ));
    }


    #[test]
    fn test_display_is_wire_code() {
        assert_eq!(Currency::Jpy.to_string(), "jpy");
    }
}
