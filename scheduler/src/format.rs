//! Message texts (Telegram HTML).

use market::Quote;
use market::pulse::Spike;

pub const GREETING_FIRST: &str = "Привет в первый раз!";
pub const GREETING_AGAIN: &str = "И снова здравствуй!";
pub const PROMPT_ADDRESS: &str = "Введите адрес токена:";
pub const PROMPT_CHAIN: &str = "Введите сеть токена (bsc, solana...):";
pub const PROMPT_NAME: &str = "Введите название токена:";
pub const TOKEN_ADDED: &str = "Токен добавлен";
pub const INPUT_CANCELLED: &str = "Ввод отменён";
pub const NOT_REGISTERED: &str = "Сначала отправьте /start";
pub const NOTHING_TRACKED: &str = "Отсутствуют токены для слежки";
pub const DATA_UNAVAILABLE: &str = "Не удалось получить текущие данные";
pub const NO_PRIOR_DATA: &str = "Не удалось получить прошлые данные";

/// One token's section of a digest report.
#[derive(Debug, Clone, PartialEq)]
pub enum DigestLine {
    Unavailable,
    NoBaseline,
    Change { percent_change: f64, current: Quote },
}

/// Escapes the characters Telegram's HTML mode treats as markup.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Sub-dollar prices: leading fractional zeros stay plain and the
/// significant digits are bold, e.g. `0.000<b>1234</b>`.
pub fn format_price(price: f64) -> String {
    let s = price.to_string();
    let Some((int_part, frac_part)) = s.split_once('.') else {
        return s;
    };
    if int_part != "0" {
        return s;
    }

    let digits = frac_part.trim_start_matches('0');
    let zeros = &frac_part[..frac_part.len() - digits.len()];
    format!("0.{zeros}<b>{digits}</b>")
}

pub fn change_icon(percent_change: f64) -> &'static str {
    if percent_change > 0.0 {
        "🟢"
    } else if percent_change < 0.0 {
        "🔴"
    } else {
        ""
    }
}

fn quote_lines(quote: &Quote) -> String {
    format!(
        "💸: ${}\n💰: ${}M\n",
        format_price(quote.price),
        quote.cap_millions
    )
}

/// Renders one chat's digest. An empty chat gets a single notice.
pub fn render_digest(lines: &[(String, DigestLine)]) -> String {
    if lines.is_empty() {
        return NOTHING_TRACKED.to_string();
    }

    let mut msg = String::new();
    for (name, line) in lines {
        msg.push_str(&format!("<b>{}</b>:\n", escape_html(name)));
        match line {
            DigestLine::Unavailable => {
                msg.push_str(DATA_UNAVAILABLE);
                msg.push('\n');
            }
            DigestLine::NoBaseline => {
                msg.push_str(NO_PRIOR_DATA);
                msg.push('\n');
            }
            DigestLine::Change {
                percent_change,
                current,
            } => {
                let icon = change_icon(*percent_change);
                if icon.is_empty() {
                    msg.push_str(&format!("Отчёт {percent_change:.2}%\n"));
                } else {
                    msg.push_str(&format!("Отчёт {icon} {percent_change:.2}%\n"));
                }
                msg.push_str(&quote_lines(current));
            }
        }
        msg.push('\n');
    }
    msg
}

pub fn render_spike(name: &str, spike: &Spike) -> String {
    format!(
        "🟢🟢🟢🟢🟢🟢\n<b>{}</b>: цена выросла на <b>{:.2}%</b> за час!\n{}",
        escape_html(name),
        spike.percent_change,
        quote_lines(&spike.quote)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_price_bolds_significant_digits() {
        assert_eq!(format_price(0.0001234), "0.000<b>1234</b>");
        assert_eq!(format_price(0.5), "0.<b>5</b>");
    }

    #[test]
    fn large_or_whole_price_is_plain() {
        assert_eq!(format_price(1.23456), "1.23456");
        assert_eq!(format_price(42.0), "42");
    }

    #[test]
    fn html_in_names_is_escaped() {
        assert_eq!(escape_html("<Foo & Bar>"), "&lt;Foo &amp; Bar&gt;");
    }

    #[test]
    fn empty_digest_is_a_notice() {
        assert_eq!(render_digest(&[]), NOTHING_TRACKED);
    }

    #[test]
    fn digest_sections_per_outcome() {
        let msg = render_digest(&[
            ("Up".into(), DigestLine::Change {
                percent_change: 12.346,
                current: Quote::new(0.05, 1.5),
            }),
            ("Down".into(), DigestLine::Change {
                percent_change: -3.0,
                current: Quote::new(2.0, 10.0),
            }),
            ("Flat".into(), DigestLine::Change {
                percent_change: 0.0,
                current: Quote::new(2.0, 10.0),
            }),
            ("Gone".into(), DigestLine::Unavailable),
            ("New".into(), DigestLine::NoBaseline),
        ]);

        assert!(msg.contains("<b>Up</b>:\nОтчёт 🟢 12.35%\n💸: $0.0<b>5</b>\n💰: $1.5M\n"));
        assert!(msg.contains("<b>Down</b>:\nОтчёт 🔴 -3.00%\n"));
        assert!(msg.contains("<b>Flat</b>:\nОтчёт 0.00%\n"));
        assert!(msg.contains(&format!("<b>Gone</b>:\n{DATA_UNAVAILABLE}\n")));
        assert!(msg.contains(&format!("<b>New</b>:\n{NO_PRIOR_DATA}\n")));
    }

    #[test]
    fn spike_text_names_token_and_percent() {
        let spike = Spike {
            average: 1.0,
            quote: Quote::new(1.05, 5.0),
            percent_change: 5.0,
        };
        let msg = render_spike("Foo", &spike);

        assert!(msg.starts_with("🟢🟢🟢🟢🟢🟢\n"));
        assert!(msg.contains("<b>Foo</b>: цена выросла на <b>5.00%</b> за час!"));
        assert!(msg.contains("💸: $1.05\n💰: $5M\n"));
    }
}
