// Static currency reference data
use crate::models::CurrencyInfo;

/// Every snapshot is expressed against this currency.
pub const BASE_CURRENCY: &str = "USD";

const fn info(
    code: &'static str,
    name: &'static str,
    symbol: &'static str,
    flag: &'static str,
) -> CurrencyInfo {
    CurrencyInfo { code, name, symbol, flag }
}

pub static ALL_CURRENCIES: [CurrencyInfo; 24] = [
    info("USD", "US Dollar", "$", "🇺🇸"),
    info("EUR", "Euro", "€", "🇪🇺"),
    info("GBP", "British Pound", "£", "🇬🇧"),
    info("JPY", "Japanese Yen", "¥", "🇯🇵"),
    info("CAD", "Canadian Dollar", "CA$", "🇨🇦"),
    info("AUD", "Australian Dollar", "A$", "🇦🇺"),
    info("CHF", "Swiss Franc", "CHF", "🇨🇭"),
    info("CNY", "Chinese Yuan", "CN¥", "🇨🇳"),
    info("INR", "Indian Rupee", "₹", "🇮🇳"),
    info("KRW", "South Korean Won", "₩", "🇰🇷"),
    info("SGD", "Singapore Dollar", "S$", "🇸🇬"),
    info("HKD", "Hong Kong Dollar", "HK$", "🇭🇰"),
    info("NOK", "Norwegian Krone", "kr", "🇳🇴"),
    info("SEK", "Swedish Krona", "kr", "🇸🇪"),
    info("DKK", "Danish Krone", "kr", "🇩🇰"),
    info("PLN", "Polish Zloty", "zł", "🇵🇱"),
    info("CZK", "Czech Koruna", "Kč", "🇨🇿"),
    info("HUF", "Hungarian Forint", "Ft", "🇭🇺"),
    info("RUB", "Russian Ruble", "₽", "🇷🇺"),
    info("BRL", "Brazilian Real", "R$", "🇧🇷"),
    info("MXN", "Mexican Peso", "MX$", "🇲🇽"),
    info("ZAR", "South African Rand", "R", "🇿🇦"),
    info("TRY", "Turkish Lira", "₺", "🇹🇷"),
    info("NZD", "New Zealand Dollar", "NZ$", "🇳🇿"),
];

/// Default dashboard selection, in display order.
pub const POPULAR_CURRENCIES: [&str; 12] = [
    "USD", "EUR", "GBP", "JPY", "CAD", "AUD", "CHF", "CNY", "INR", "KRW", "SGD", "HKD",
];

pub fn get_currency_info(code: &str) -> Option<&'static CurrencyInfo> {
    ALL_CURRENCIES.iter().find(|c| c.code == code)
}

pub fn popular_currencies() -> impl Iterator<Item = &'static CurrencyInfo> {
    POPULAR_CURRENCIES.iter().filter_map(|code| get_currency_info(code))
}

/// Currencies quoted without minor units.
pub fn has_minor_units(code: &str) -> bool {
    !matches!(code, "JPY" | "KRW")
}
