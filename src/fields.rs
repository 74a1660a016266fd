//! Static per-service field catalog: the mapping between the small integer
//! codes a service puts on the wire and their symbolic field names.
//!
//! Field code `0` is always the key/symbol. By convention it is not renamed:
//! it already arrives under the literal `key` field in a data entry's
//! content, never under the numeric key `"0"`. It is still counted in
//! [`all_field_codes`] so that "subscribe all fields" includes it in the
//! joined parameter.

use serde::{Deserialize, Serialize};

/// One of the broker's named streaming services. Each has its own field
/// schema (see the per-service tables below) and command set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceId {
    Admin,
    AcctActivity,
    ChartEquity,
    ChartFutures,
    ChartOptions,
    ChartForex,
    Quote,
    Option,
    LevelOneFutures,
    LevelOneForex,
    LevelOneFuturesOptions,
    NewsHeadline,
    TimesaleEquity,
    TimesaleFutures,
    TimesaleOptions,
    NasdaqBook,
    NyseBook,
    OptionsBook,
    ListedBook,
}

impl ServiceId {
    /// The name this service is addressed by on the wire (the `service`
    /// field of a request or data frame).
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::AcctActivity => "ACCT_ACTIVITY",
            Self::ChartEquity => "CHART_EQUITY",
            Self::ChartFutures => "CHART_FUTURES",
            Self::ChartOptions => "CHART_OPTIONS",
            Self::ChartForex => "CHART_FOREX",
            Self::Quote => "QUOTE",
            Self::Option => "OPTION",
            Self::LevelOneFutures => "LEVELONE_FUTURES",
            Self::LevelOneForex => "LEVELONE_FOREX",
            Self::LevelOneFuturesOptions => "LEVELONE_FUTURES_OPTIONS",
            Self::NewsHeadline => "NEWS_HEADLINE",
            Self::TimesaleEquity => "TIMESALE_EQUITY",
            Self::TimesaleFutures => "TIMESALE_FUTURES",
            Self::TimesaleOptions => "TIMESALE_OPTIONS",
            Self::NasdaqBook => "NASDAQ_BOOK",
            Self::NyseBook => "NYSE_BOOK",
            Self::OptionsBook => "OPTIONS_BOOK",
            Self::ListedBook => "LISTED_BOOK",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Some(match name {
            "ADMIN" => Self::Admin,
            "ACCT_ACTIVITY" => Self::AcctActivity,
            "CHART_EQUITY" => Self::ChartEquity,
            "CHART_FUTURES" => Self::ChartFutures,
            "CHART_OPTIONS" => Self::ChartOptions,
            "CHART_FOREX" => Self::ChartForex,
            "QUOTE" => Self::Quote,
            "OPTION" => Self::Option,
            "LEVELONE_FUTURES" => Self::LevelOneFutures,
            "LEVELONE_FOREX" => Self::LevelOneForex,
            "LEVELONE_FUTURES_OPTIONS" => Self::LevelOneFuturesOptions,
            "NEWS_HEADLINE" => Self::NewsHeadline,
            "TIMESALE_EQUITY" => Self::TimesaleEquity,
            "TIMESALE_FUTURES" => Self::TimesaleFutures,
            "TIMESALE_OPTIONS" => Self::TimesaleOptions,
            "NASDAQ_BOOK" => Self::NasdaqBook,
            "NYSE_BOOK" => Self::NyseBook,
            "OPTIONS_BOOK" => Self::OptionsBook,
            "LISTED_BOOK" => Self::ListedBook,
            _ => return None,
        })
    }

    fn table(self) -> &'static [&'static str] {
        match self {
            Self::Admin => ADMIN_FIELDS,
            Self::AcctActivity => ACCT_ACTIVITY_FIELDS,
            Self::ChartEquity | Self::ChartFutures | Self::ChartOptions | Self::ChartForex => {
                CHART_FIELDS
            }
            Self::Quote => QUOTE_FIELDS,
            Self::Option => OPTION_FIELDS,
            Self::LevelOneFutures => LEVELONE_FUTURES_FIELDS,
            Self::LevelOneForex => LEVELONE_FOREX_FIELDS,
            Self::LevelOneFuturesOptions => LEVELONE_FUTURES_OPTIONS_FIELDS,
            Self::NewsHeadline => NEWS_HEADLINE_FIELDS,
            Self::TimesaleEquity | Self::TimesaleFutures | Self::TimesaleOptions => {
                TIMESALE_FIELDS
            }
            Self::NasdaqBook | Self::NyseBook | Self::ListedBook => BOOK_FIELDS,
            Self::OptionsBook => OPTIONS_BOOK_FIELDS,
        }
    }
}

/// All field codes declared for `service`, contiguous from `0` to `N-1`.
pub fn all_field_codes(service: ServiceId) -> Vec<u32> {
    (0..service.table().len() as u32).collect()
}

/// The symbolic name for `code` within `service`'s schema, if declared.
pub fn symbolic(service: ServiceId, code: u32) -> Option<&'static str> {
    service.table().get(code as usize).copied()
}

/// The numeric code for `name` within `service`'s schema, if declared.
pub fn code_of(service: ServiceId, name: &str) -> Option<u32> {
    service.table().iter().position(|&n| n == name).map(|i| i as u32)
}

const ADMIN_FIELDS: &[&str] = &["key"];

const ACCT_ACTIVITY_FIELDS: &[&str] = &["key", "ACCOUNT", "MESSAGE_TYPE", "MESSAGE_DATA"];

const CHART_FIELDS: &[&str] = &[
    "key",
    "OPEN_PRICE",
    "HIGH_PRICE",
    "LOW_PRICE",
    "CLOSE_PRICE",
    "VOLUME",
    "SEQUENCE",
    "CHART_TIME",
    "CHART_DAY",
];

const QUOTE_FIELDS: &[&str] = &[
    "key",
    "BID_PRICE",
    "ASK_PRICE",
    "LAST_PRICE",
    "BID_SIZE",
    "ASK_SIZE",
    "ASK_ID",
    "BID_ID",
    "TOTAL_VOLUME",
    "LAST_SIZE",
    "TRADE_TIME",
    "QUOTE_TIME",
    "HIGH_PRICE",
    "LOW_PRICE",
    "BID_TICK",
    "CLOSE_PRICE",
    "EXCHANGE_ID",
    "MARGINABLE",
    "SHORTABLE",
    "ISLAND_BID_DEPRECATED",
    "ISLAND_ASK_DEPRECATED",
    "ISLAND_VOLUME_DEPRECATED",
    "QUOTE_DAY",
    "TRADE_DAY",
    "VOLATILITY",
    "DESCRIPTION",
    "LAST_ID",
    "DIGITS",
    "OPEN_PRICE",
    "NET_CHANGE",
    "HIGH_52_WEEK",
    "LOW_52_WEEK",
    "PE_RATIO",
    "DIVIDEND_AMOUNT",
    "DIVIDEND_YIELD",
    "ISLAND_BID_SIZE_DEPRECATED",
    "ISLAND_ASK_SIZE_DEPRECATED",
    "NAV",
    "FUND_PRICE",
    "EXCHANGE_NAME",
    "DIVIDEND_DATE",
    "IS_REGULAR_MARKET_QUOTE",
    "IS_REGULAR_MARKET_TRADE",
    "REGULAR_MARKET_LAST_PRICE",
    "REGULAR_MARKET_LAST_SIZE",
    "REGULAR_MARKET_TRADE_TIME",
    "REGULAR_MARKET_TRADE_DAY",
    "REGULAR_MARKET_NET_CHANGE",
    "SECURITY_STATUS",
    "MARK",
    "QUOTE_TIME_IN_LONG",
    "TRADE_TIME_IN_LONG",
    "REGULAR_MARKET_TRADE_TIME_IN_LONG",
];

const OPTION_FIELDS: &[&str] = &[
    "key",
    "DESCRIPTION",
    "BID_PRICE",
    "ASK_PRICE",
    "LAST_PRICE",
    "HIGH_PRICE",
    "LOW_PRICE",
    "CLOSE_PRICE",
    "TOTAL_VOLUME",
    "OPEN_INTEREST",
    "VOLATILITY",
    "QUOTE_TIME_IN_LONG",
    "TRADE_TIME_IN_LONG",
    "MONEY_INTRINSIC_VALUE",
    "QUOTE_DAY",
    "TRADE_DAY",
    "EXPIRATION_YEAR",
    "MULTIPLIER",
    "DIGITS",
    "OPEN_PRICE",
    "BID_SIZE",
    "ASK_SIZE",
    "LAST_SIZE",
    "NET_CHANGE",
    "STRIKE_PRICE",
    "CONTRACT_TYPE",
    "UNDERLYING",
    "EXPIRATION_MONTH",
    "DELIVERABLES",
    "TIME_VALUE",
    "EXPIRATION_DAY",
    "DAYS_TO_EXPIRATION",
    "DELTA",
    "GAMMA",
    "THETA",
    "VEGA",
    "RHO",
    "SECURITY_STATUS",
    "THEORETICAL_OPTION_VALUE",
    "UNDERLYING_PRICE",
    "UV_EXPIRATION_TYPE",
    "MARK",
];

const LEVELONE_FUTURES_FIELDS: &[&str] = &[
    "key",
    "BID_PRICE",
    "ASK_PRICE",
    "LAST_PRICE",
    "BID_SIZE",
    "ASK_SIZE",
    "BID_ID",
    "ASK_ID",
    "TOTAL_VOLUME",
    "LAST_SIZE",
    "QUOTE_TIME",
    "TRADE_TIME",
    "HIGH_PRICE",
    "LOW_PRICE",
    "CLOSE_PRICE",
    "EXCHANGE_ID",
    "DESCRIPTION",
    "LAST_ID",
    "OPEN_PRICE",
    "NET_CHANGE",
    "FUTURE_PERCENT_CHANGE",
    "EXCHANGE_NAME",
    "SECURITY_STATUS",
    "OPEN_INTEREST",
    "MARK",
    "TICK",
    "TICK_AMOUNT",
    "PRODUCT",
    "FUTURE_PRICE_FORMAT",
    "FUTURE_TRADING_HOURS",
    "FUTURE_IS_TRADABLE",
    "FUTURE_MULTIPLIER",
    "FUTURE_IS_ACTIVE",
    "FUTURE_SETTLEMENT_PRICE",
    "FUTURE_ACTIVE_SYMBOL",
    "FUTURE_EXPIRATION_DATE",
];

const LEVELONE_FOREX_FIELDS: &[&str] = &[
    "key",
    "BID_PRICE",
    "ASK_PRICE",
    "LAST_PRICE",
    "BID_SIZE",
    "ASK_SIZE",
    "TOTAL_VOLUME",
    "LAST_SIZE",
    "QUOTE_TIME",
    "TRADE_TIME",
    "HIGH_PRICE",
    "LOW_PRICE",
    "CLOSE_PRICE",
    "EXCHANGE_ID",
    "DESCRIPTION",
    "OPEN_PRICE",
    "NET_CHANGE",
    "PERCENT_CHANGE",
    "EXCHANGE_NAME",
    "DIGITS",
    "SECURITY_STATUS",
    "TICK",
    "TICK_AMOUNT",
    "PRODUCT",
    "TRADING_HOURS",
    "IS_TRADABLE",
    "MARKET_MAKER",
    "HIGH_52_WEEK",
    "LOW_52_WEEK",
    "MARK",
];

const LEVELONE_FUTURES_OPTIONS_FIELDS: &[&str] = &[
    "key",
    "BID_PRICE",
    "ASK_PRICE",
    "LAST_PRICE",
    "BID_SIZE",
    "ASK_SIZE",
    "ASK_ID",
    "BID_ID",
    "TOTAL_VOLUME",
    "LAST_SIZE",
    "QUOTE_TIME",
    "TRADE_TIME",
    "HIGH_PRICE",
    "LOW_PRICE",
    "CLOSE_PRICE",
    "EXCHANGE_ID",
    "DESCRIPTION",
    "LAST_ID",
    "OPEN_PRICE",
    "OPEN_INTEREST",
    "NET_CHANGE",
    "EXCHANGE_NAME",
    "SECURITY_STATUS",
    "FUTURE_PERCENT_CHANGE",
    "FUTURE_PRICE_FORMAT",
    "MARK",
    "TICK",
    "TICK_AMOUNT",
    "FUTURE_MULTIPLIER",
    "FUTURE_SETTLEMENT_PRICE",
    "UNDERLYING_SYMBOL",
    "STRIKE_PRICE",
    "FUTURE_EXPIRATION_DATE",
    "EXPIRATION_STYLE",
];

const NEWS_HEADLINE_FIELDS: &[&str] = &[
    "key",
    "ERROR_CODE",
    "STORY_DATETIME",
    "HEADLINE_ID",
    "STATUS",
    "HEADLINE",
    "STORY_ID",
    "COUNT_FOR_KEYWORD",
    "KEYWORD_ARRAY",
    "IS_HOT",
];

const TIMESALE_FIELDS: &[&str] =
    &["key", "TRADE_TIME", "LAST_PRICE", "LAST_SIZE", "LAST_SEQUENCE"];

const BOOK_FIELDS: &[&str] = &["key", "BOOK_TIME", "BIDS", "ASKS"];
const OPTIONS_BOOK_FIELDS: &[&str] = &["key", "BOOK_TIME", "BIDS", "ASKS"];
