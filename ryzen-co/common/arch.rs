// Processor codename reported by the ryzen_smu driver

use ryzen_co_raw::{read_fixed_text, Endpoint};

use crate::error::{Result, SmuError};

/// Length of the driver's codename file ("NN\n")
pub const CODENAME_LEN: usize = 3;

indexed_enum! {
    pub enum Codename {
        Unspecified => "Unspecified",
        Colfax => "Colfax",
        Renoir => "Renoir",
        Picasso => "Picasso",
        Matisse => "Matisse",
        Threadripper => "Threadripper",
        CastlePeak => "Castle Peak",
        RavenRidge => "Raven Ridge",
        RavenRidge2 => "Raven Ridge 2",
        SummitRidge => "Summit Ridge",
        PinnacleRidge => "Pinnacle Ridge",
        Rembrandt => "Rembrandt",
        Vermeer => "Vermeer",
        Vangogh => "Vangogh",
        Cezanne => "Cezanne",
        Milan => "Milan",
        Dali => "Dali",
        Lucienne => "Lucienne",
        Naples => "Naples",
        Chagall => "Chagall",
        Raphael => "Raphael",
        Phoenix => "Phoenix",
    }
}

impl Codename {
    /// Decode the driver's numeric code; 0 and unknown codes are errors
    pub fn parse(text: &str) -> Result<Codename> {
        let trimmed = text.trim();
        let index: usize = trimmed
            .parse()
            .map_err(|_| SmuError::UnknownCodename(format!("{trimmed:?} is not a number")))?;

        match Codename::from_index(index) {
            Some(Codename::Unspecified) | None => {
                Err(SmuError::UnknownCodename(format!("code {index}")))
            }
            Some(codename) => Ok(codename),
        }
    }

    pub fn read_from<E: Endpoint + ?Sized>(endpoint: &E) -> Result<Codename> {
        let text = read_fixed_text(endpoint, Some(CODENAME_LEN))?;
        let codename = Self::parse(&text)?;
        tracing::info!("Processor code name: {}", codename.name());
        Ok(codename)
    }

    /// Family 19h parts whose curve optimizer commands match `current_arch`
    pub fn is_family19h(&self) -> bool {
        matches!(
            self,
            Codename::Vermeer
                | Codename::Cezanne
                | Codename::Rembrandt
                | Codename::Chagall
                | Codename::Raphael
                | Codename::Phoenix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::sim::TextEndpoint;

    #[test]
    fn test_codename_table() {
        assert_eq!(Codename::all().len(), 22);
        assert_eq!(Codename::from_index(20), Some(Codename::Raphael));
        assert_eq!(Codename::Raphael.name(), "Raphael");
        assert_eq!(Codename::CastlePeak.name(), "Castle Peak");
    }

    #[test]
    fn test_parse_rejects_unspecified_and_out_of_range() {
        assert!(Codename::parse("0\n").is_err());
        assert!(Codename::parse("22\n").is_err());
        assert!(Codename::parse("ab").is_err());
        assert_eq!(Codename::parse("12\n").unwrap(), Codename::Vermeer);
    }

    #[test]
    fn test_read_from_endpoint() {
        let codename = Codename::read_from(&TextEndpoint("20\n")).unwrap();
        assert_eq!(codename, Codename::Raphael);
        assert!(codename.is_family19h());
        assert!(!Codename::Matisse.is_family19h());
    }

    #[test]
    fn test_read_from_short_endpoint() {
        let err = Codename::read_from(&TextEndpoint("4\n")).unwrap_err();
        assert!(matches!(err, SmuError::Io(_)));
    }
}
