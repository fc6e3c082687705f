//! Chat command surface: `currency` and `currencylist`.

pub mod reply;

use crate::core::config::ListMode;
use crate::core::{ConversionRequest, ConversionService, RateSource};
pub use reply::Reply;
use tracing::{debug, info};

/// Command host for one conversation; owns that conversation's rate cache.
pub struct CurrencyBot<S: RateSource> {
    service: ConversionService<S>,
    list_mode: ListMode,
}

impl<S: RateSource> CurrencyBot<S> {
    pub fn new(service: ConversionService<S>, list_mode: ListMode) -> Self {
        Self { service, list_mode }
    }

    /// `currency <amount> <from> <to>`
    pub async fn currency(&self, args: &str) -> Reply {
        let request = match args.parse::<ConversionRequest>() {
            Ok(request) => request,
            Err(_) => return Reply::Usage,
        };

        match self.service.convert_request(&request).await {
            Ok(conversion) => Reply::Converted(conversion),
            Err(e) => {
                info!(error = %e, "currency command failed");
                Reply::error(e)
            }
        }
    }

    /// `currencylist`, rendered in `mode` or the configured mode.
    pub async fn currency_list(&self, mode: Option<ListMode>) -> Reply {
        match self.service.list_currencies().await {
            Ok(listing) => match mode.unwrap_or(self.list_mode) {
                ListMode::Grouped => Reply::ByRegion(listing),
                ListMode::Flat => Reply::Flat(listing),
            },
            Err(e) => {
                info!(error = %e, "currencylist command failed");
                Reply::error(e)
            }
        }
    }

    /// Routes one chat line to its command. `None` when the line is not a
    /// command this bot knows.
    pub async fn dispatch(&self, line: &str) -> Option<Reply> {
        let line = line.trim();
        let line = line.strip_prefix('!').unwrap_or(line);
        let (command, args) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        debug!(%command, %args, "Dispatching command");

        match command.to_lowercase().as_str() {
            "currency" => Some(self.currency(args).await),
            "currencylist" => Some(self.currency_list(None).await),
            "help" => Some(Reply::Usage),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::tests::MockRateSource;

    fn mock() -> MockRateSource {
        MockRateSource::new(&[
            ("USD", vec![("USD", 1.0), ("EUR", 0.9), ("AED", 3.67)]),
            ("EUR", vec![("EUR", 1.0), ("USD", 1.1)]),
        ])
    }

    fn bot(source: &MockRateSource, mode: ListMode) -> CurrencyBot<&MockRateSource> {
        CurrencyBot::new(ConversionService::new(source), mode)
    }

    #[tokio::test]
    async fn test_currency_command() {
        let source = mock();
        let bot = bot(&source, ListMode::Grouped);

        let reply = bot.currency("100 usd eur").await;
        assert_eq!(reply.to_string(), "💱 100 USD = 90.00 EUR");

        let reply = bot.currency("12,5 USD EUR").await;
        assert_eq!(reply.to_string(), "💱 12.5 USD = 11.25 EUR");
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_currency_usage() {
        let source = mock();
        let bot = bot(&source, ListMode::Grouped);

        assert_eq!(bot.currency("").await, Reply::Usage);
        assert_eq!(bot.currency("100 USD").await, Reply::Usage);
        assert_eq!(bot.currency("1 2 3 4").await, Reply::Usage);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_currency_errors() {
        let source = mock();
        let bot = bot(&source, ListMode::Grouped);

        assert_eq!(
            bot.currency("abc USD EUR").await.to_string(),
            "❗ Error: Invalid amount: abc"
        );
        assert_eq!(
            bot.currency("100 USD ZZZ").await.to_string(),
            "❗ Error: Currency ZZZ is not supported"
        );

        source
            .failing
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let reply = bot.currency("100 EUR USD").await;
        assert!(reply.is_error());
        assert!(
            reply
                .to_string()
                .starts_with("❗ Error: Failed to fetch exchange rates for EUR")
        );
    }

    #[tokio::test]
    async fn test_currency_list_modes() {
        let source = mock();
        let bot = bot(&source, ListMode::Flat);

        assert_eq!(bot.currency_list(None).await.to_string(), "AED\nEUR\nUSD");

        let grouped = bot.currency_list(Some(ListMode::Grouped)).await.to_string();
        assert!(grouped.contains("🌍 Europe: EUR"));
        assert!(grouped.contains("🌍 Americas: USD"));
        assert!(grouped.ends_with("📄 All available currencies:\nAED  EUR  USD"));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_dispatch() {
        let source = mock();
        let bot = bot(&source, ListMode::Grouped);

        let reply = bot.dispatch("!currency 1 USD EUR").await.unwrap();
        assert_eq!(reply.to_string(), "💱 1 USD = 0.90 EUR");

        let reply = bot.dispatch("  CurrencyList ").await.unwrap();
        assert!(matches!(reply, Reply::ByRegion(_)));

        assert_eq!(bot.dispatch("help").await, Some(Reply::Usage));
        assert_eq!(bot.dispatch("!currency").await, Some(Reply::Usage));
        assert!(bot.dispatch("weather London").await.is_none());
    }
}
