use steam_tradeoffers::SteamTradeOffers;
use owo_colors::OwoColorize;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    
    let sessionid = std::env::var("SESSIONID")?;
    let cookies = std::env::var("COOKIES")?
        .split("; ")
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
    let api = SteamTradeOffers::new()?;
    // ***IMPORTANT***: By calling this method you are agreeing to the Steam Web API Terms of Use: 
    // https://steamcommunity.com/dev/apiterms
    let api_key = api.setup(&sessionid, &cookies).await?;
    
    println!("Your Steam Web API key is {}", api_key.bold());
    
    Ok(())
}
