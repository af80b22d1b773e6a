use steam_tradeoffers::{SteamID, SteamTradeOffers};
use steam_tradeoffers::request::{LoadInventoryOptions, NewTradeOffer, NewTradeOfferItem};
use owo_colors::OwoColorize;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    
    let sessionid = std::env::var("SESSIONID")?;
    let cookies = std::env::var("COOKIES")?
        .split("; ")
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
    let partner = SteamID::from(std::env::var("PARTNER_STEAMID")?.parse::<u64>()?);
    // e.g. https://steamcommunity.com/tradeoffer/new/?partner=39734272&token=TkA5KFkh
    let trade_offer_url = std::env::var("TRADE_OFFER_URL")?;
    let api = SteamTradeOffers::new()?;
    
    api.set_session(&sessionid, &cookies)?;
    
    let inventory = api.load_my_inventory(&LoadInventoryOptions::new(440, 2)).await?;
    // Give away the first tradable key.
    let item = inventory
        .iter()
        .find(|item| item.get_str("market_hash_name") == Some("Mann Co. Supply Crate Key"))
        .and_then(|item| NewTradeOfferItem::from_inventory_item(440, item))
        .ok_or("No key to give")?;
    let offer = NewTradeOffer::builder(partner)
        .trade_offer_url(&trade_offer_url)
        .items_to_give(vec![item])
        .message("Here's a key".into())
        .build();
    let sent_offer = api.make_offer(&offer).await?;
    
    println!("Sent offer {}", sent_offer.tradeofferid.bold());
    
    Ok(())
}
