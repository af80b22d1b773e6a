use crate::response::{TradeOffer, TradeOffers};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Deserialize, Debug)]
pub struct GetTradeOffersResponseBody {
    #[serde(default)]
    pub trade_offers_sent: Vec<TradeOffer>,
    #[serde(default)]
    pub trade_offers_received: Vec<TradeOffer>,
    #[serde(default)]
    pub descriptions: Vec<Map<String, Value>>,
    pub next_cursor: Option<u32>,
}

#[derive(Deserialize, Debug)]
pub struct GetTradeOffersResponse {
    pub response: GetTradeOffersResponseBody,
}

impl From<GetTradeOffersResponse> for TradeOffers {
    fn from(body: GetTradeOffersResponse) -> Self {
        let body = body.response;

        Self {
            sent: body.trade_offers_sent,
            received: body.trade_offers_received,
            descriptions: body.descriptions,
            next_cursor: body.next_cursor.filter(|cursor| *cursor > 0),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct GetTradeOfferResponseBody {
    pub offer: Option<TradeOffer>,
}

#[derive(Deserialize, Debug)]
pub struct GetTradeOfferResponse {
    pub response: GetTradeOfferResponseBody,
}
