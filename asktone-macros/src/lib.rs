use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{LitStr, parse_macro_input};

const DEFAULT_SAMPLE_RATE: u32 = 44100;
const DEFAULT_CHANNELS: u16 = 1;

/// Creates an `AudioFormat` at compile time from a string literal.
///
/// The literal is parsed and validated during compilation, so a malformed
/// format never reaches the synthesizer at runtime.
///
/// # Format
///
/// The format is: `<type><bits>[order][@rate][xchannels]` where:
/// - `type` is `s` (signed) or `u` (unsigned)
/// - `bits` is `8` or `16`
/// - `order` is `le` or `be`; required for 16-bit, not allowed for 8-bit
/// - `rate` is the sample rate in Hz, defaults to 44100
/// - `channels` is the channel count, defaults to 1
///
/// # Examples
///
/// ```ignore
/// use asktone::pcm_format;
///
/// // CD-rate mono, signed 16-bit little-endian
/// let cd = pcm_format!("s16le@44100");
///
/// // 8 kHz stereo unsigned 8-bit
/// let lofi = pcm_format!("u8@8000x2");
/// ```
#[proc_macro]
pub fn pcm_format(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as LitStr);
    let format_str = input.value();

    match parse_format(&format_str) {
        Ok(spec) => TokenStream::from(spec.to_tokens()),
        Err(e) => {
            let error_msg = format!("Invalid PCM format '{}': {}", format_str, e);
            let expanded = quote! {
                compile_error!(#error_msg)
            };
            TokenStream::from(expanded)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Signed,
    Unsigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Little,
    Big,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FormatSpec {
    kind: Kind,
    bits: u8,
    order: Order,
    rate: u32,
    channels: u16,
}

impl FormatSpec {
    fn to_tokens(self) -> TokenStream2 {
        let rate = self.rate;
        let channels = self.channels;
        let size = match self.bits {
            8 => quote!(::asktone::SampleSize::Bits8),
            _ => quote!(::asktone::SampleSize::Bits16),
        };
        let kind = match self.kind {
            Kind::Signed => quote!(::asktone::SampleType::Signed),
            Kind::Unsigned => quote!(::asktone::SampleType::Unsigned),
        };
        let order = match self.order {
            Order::Little => quote!(::asktone::ByteOrder::Little),
            Order::Big => quote!(::asktone::ByteOrder::Big),
        };

        quote! {
            ::asktone::AudioFormat {
                sample_rate_hz: #rate,
                sample_size: #size,
                sample_type: #kind,
                byte_order: #order,
                channel_count: #channels,
            }
        }
    }
}

fn parse_format(s: &str) -> Result<FormatSpec, String> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return Err("empty string".to_string());
    }

    // Split off the optional "xN" channel suffix, then the optional "@rate"
    let (head, channels) = match s.rsplit_once('x') {
        Some((head, n)) => {
            let channels = n
                .parse::<u16>()
                .map_err(|_| format!("invalid channel count '{}'", n))?;
            (head, channels)
        }
        None => (s.as_str(), DEFAULT_CHANNELS),
    };
    if channels == 0 {
        return Err("channel count must be at least 1".to_string());
    }

    let (sample, rate) = match head.split_once('@') {
        Some((sample, r)) => {
            let rate = r
                .parse::<u32>()
                .map_err(|_| format!("invalid sample rate '{}'", r))?;
            (sample, rate)
        }
        None => (head, DEFAULT_SAMPLE_RATE),
    };
    if rate == 0 {
        return Err("sample rate must be positive".to_string());
    }

    let mut chars = sample.chars();
    let kind = match chars.next() {
        Some('s') => Kind::Signed,
        Some('u') => Kind::Unsigned,
        Some(c) => return Err(format!("invalid sample type '{}'", c)),
        None => return Err("missing sample type".to_string()),
    };
    let rest = chars.as_str();

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (bits_str, order_str) = rest.split_at(digits_end);
    let bits = bits_str
        .parse::<u8>()
        .map_err(|_| format!("invalid sample size '{}'", bits_str))?;

    let order = match (bits, order_str) {
        (8, "") => Order::Little,
        (8, _) => return Err("8-bit samples take no byte order".to_string()),
        (16, "le") => Order::Little,
        (16, "be") => Order::Big,
        (16, "") => return Err("16-bit samples need a byte order (le or be)".to_string()),
        (16, other) => return Err(format!("invalid byte order '{}'", other)),
        (other, _) => return Err(format!("unsupported sample size {} (use 8 or 16)", other)),
    };

    Ok(FormatSpec {
        kind,
        bits,
        order,
        rate,
        channels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_format() {
        let spec = parse_format("s16le@48000x2").unwrap();
        assert_eq!(spec.kind, Kind::Signed);
        assert_eq!(spec.bits, 16);
        assert_eq!(spec.order, Order::Little);
        assert_eq!(spec.rate, 48000);
        assert_eq!(spec.channels, 2);
    }

    #[test]
    fn test_parse_defaults() {
        let spec = parse_format("u16be").unwrap();
        assert_eq!(spec.kind, Kind::Unsigned);
        assert_eq!(spec.order, Order::Big);
        assert_eq!(spec.rate, 44100);
        assert_eq!(spec.channels, 1);

        let spec = parse_format("U8@8000").unwrap();
        assert_eq!(spec.bits, 8);
        assert_eq!(spec.rate, 8000);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_format("").is_err());
        assert!(parse_format("f32le").is_err());
        assert!(parse_format("s24le").is_err());
        assert!(parse_format("s16").is_err());
        assert!(parse_format("s8le").is_err());
        assert!(parse_format("s16xx").is_err());
        assert!(parse_format("s16le@0").is_err());
        assert!(parse_format("s16le@44100x0").is_err());
    }
}
