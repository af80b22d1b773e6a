use super::{NewTradeOfferItem, NewTradeOffer};
use crate::SteamID;
use crate::types::TradeOfferId;

/// Builder for constructing new trade offers.
pub struct NewTradeOfferBuilder {
    partner: SteamID,
    items_to_give: Vec<NewTradeOfferItem>,
    items_to_receive: Vec<NewTradeOfferItem>,
    message: Option<String>,
    token: Option<String>,
    counter_tradeofferid: Option<TradeOfferId>,
}

impl NewTradeOfferBuilder {
    /// Creates a new [`NewTradeOfferBuilder`] with the given partner.
    pub fn new(partner: SteamID) -> Self {
        Self {
            partner,
            items_to_give: Vec::new(),
            items_to_receive: Vec::new(),
            message: None,
            token: None,
            counter_tradeofferid: None,
        }
    }

    /// The items to give in this offer.
    pub fn items_to_give<T>(mut self, items: T) -> Self
    where
        T: IntoIterator,
        T::Item: Into<NewTradeOfferItem>
    {
        self.items_to_give = items.into_iter().map(|i| i.into()).collect();
        self
    }

    /// The items to receive in this offer.
    pub fn items_to_receive<T>(mut self, items: T) -> Self
    where
        T: IntoIterator,
        T::Item: Into<NewTradeOfferItem>
    {
        self.items_to_receive = items.into_iter().map(|i| i.into()).collect();
        self
    }

    /// The trade offer URL for sending an offer if you are not friends with the partner.
    /// The token is left unset if the URL does not contain one.
    pub fn trade_offer_url(mut self, trade_offer_url: &str) -> Self {
        self.token = parse_offer_access_token(trade_offer_url);
        self
    }

    /// The token for sending an offer if you are not friends with the partner.
    pub fn token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    /// The message to send in this offer.
    pub fn message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }

    /// Sends this offer as a counter offer to an existing offer.
    pub fn counter(mut self, tradeofferid: TradeOfferId) -> Self {
        self.counter_tradeofferid = Some(tradeofferid);
        self
    }

    /// Builds into [`NewTradeOffer`].
    pub fn build(self) -> NewTradeOffer {
        NewTradeOffer {
            partner: self.partner,
            items_to_give: self.items_to_give,
            items_to_receive: self.items_to_receive,
            message: self.message,
            token: self.token,
            counter_tradeofferid: self.counter_tradeofferid,
        }
    }
}

/// Reads the `token` parameter of a trade offer URL on steamcommunity.com.
pub(crate) fn parse_offer_access_token(trade_offer_url: &str) -> Option<String> {
    let url = url::Url::parse(trade_offer_url).ok()?;

    if url.host_str() != Some("steamcommunity.com") {
        return None;
    }

    url.query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trade_offer_url() {
        let url = "https://steamcommunity.com/tradeoffer/new/?partner=0&token=TkA5KFkh";
        let token = parse_offer_access_token(url).unwrap();

        assert_eq!(token, "TkA5KFkh");
    }

    #[test]
    fn ignores_other_hosts() {
        let url = "https://example.com/tradeoffer/new/?partner=0&token=TkA5KFkh";

        assert_eq!(parse_offer_access_token(url), None);
    }

    #[test]
    fn builds_counter_offer() {
        let offer = NewTradeOffer::builder(SteamID::from(76561198000000000))
            .items_to_give(vec![NewTradeOfferItem {
                appid: 440,
                contextid: 2,
                assetid: 1,
                amount: 1,
            }])
            .message("hello".into())
            .counter(4000)
            .build();

        assert!(!offer.is_empty());
        assert_eq!(offer.counter_tradeofferid, Some(4000));
        assert_eq!(offer.message.as_deref(), Some("hello"));
    }
}
