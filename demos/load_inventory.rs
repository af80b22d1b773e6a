use steam_tradeoffers::{SteamID, SteamTradeOffers, Language};
use steam_tradeoffers::request::{LoadInventoryOptions, LoadPartnerInventoryOptions};
use owo_colors::OwoColorize;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    
    let sessionid = std::env::var("SESSIONID")?;
    let cookies = std::env::var("COOKIES")?
        .split("; ")
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
    let api = SteamTradeOffers::builder()
        .language(Language::English)
        .build()?;
    
    api.set_session(&sessionid, &cookies)?;
    
    let inventory = api.load_my_inventory(&LoadInventoryOptions::new(440, 2)).await?;
    
    println!("You have {} tradable items", inventory.len().bold());
    
    for item in inventory.iter().take(10) {
        println!("{}", item.get_str("market_hash_name").unwrap_or("Unknown"));
    }
    
    if let Ok(partner) = std::env::var("PARTNER_STEAMID") {
        let partner = SteamID::from(partner.parse::<u64>()?);
        let options = LoadPartnerInventoryOptions::new(partner, 440, 2);
        let inventory = api.load_partner_inventory(&options).await?;
        
        println!("Your partner has {} items", inventory.len().bold());
    }
    
    Ok(())
}
