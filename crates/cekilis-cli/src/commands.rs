use std::sync::Arc;

use cekilis_core::{ClockPort, Error, FixedClock, Result, SystemClock};
use cekilis_model::schema::schema_for;
use cekilis_model::{
    days_until_raffle, parse_raffle_date, Artwork, Collection, Ticket, TicketSelection,
};
use cekilis_storefront::{SeededShuffle, Storefront, StorefrontConfig, MULTIPLIER_PRESETS};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::output::{emit, OutputMode};
use crate::{CollectionArg, Commands};

pub(crate) struct StoreCommand {
    pub(crate) config: StorefrontConfig,
    pub(crate) category: Option<String>,
    pub(crate) seed: Option<u64>,
    pub(crate) output_mode: OutputMode,
}

impl From<CollectionArg> for Collection {
    fn from(value: CollectionArg) -> Self {
        match value {
            CollectionArg::Tickets => Self::Tickets,
            CollectionArg::Artworks => Self::Artworks,
        }
    }
}

pub(crate) fn countdown(date: &str, now: Option<&str>, output_mode: OutputMode) -> Result<()> {
    let clock: Box<dyn ClockPort> = match now {
        Some(raw) => Box::new(FixedClock(parse_now(raw)?)),
        None => Box::new(SystemClock),
    };
    let now = clock.now();
    let days = days_until_raffle(date, now);
    emit(
        output_mode,
        &json!({
            "raffle_date": date,
            "parsed": parse_raffle_date(date).map(|d| d.to_string()),
            "now": now.to_rfc3339(),
            "days": days,
        }),
        &[days.to_string()],
    )
}

fn parse_now(raw: &str) -> Result<DateTime<Utc>> {
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| Error::InvalidArgument {
            name: "now",
            reason: format!("`{raw}` is neither YYYY-MM-DD nor RFC 3339"),
        })
}

pub(crate) fn schema(collection: CollectionArg, output_mode: OutputMode) -> Result<()> {
    let fields = schema_for(collection.into());
    let payload: Map<String, Value> = fields
        .iter()
        .map(|field| (field.key().to_string(), field.default_json()))
        .collect();
    let text: Vec<String> = fields
        .iter()
        .map(|field| format!("{}={}", field.key(), field.default_json()))
        .collect();
    emit(output_mode, &Value::Object(payload), &text)
}

pub(crate) async fn run_store_command(ctx: StoreCommand, command: &Commands) -> Result<()> {
    let mut storefront = Storefront::from_config(ctx.config)?;
    if let Some(seed) = ctx.seed {
        storefront = storefront.with_shuffle(Arc::new(SeededShuffle::new(seed)));
    }
    let selected = ctx
        .category
        .unwrap_or_else(|| storefront.config().show_all_category.clone());
    let output_mode = ctx.output_mode;

    match command {
        Commands::Tickets => {
            storefront.tickets().fetch().await?;
            let tickets = storefront.visible_tickets(&selected);
            info!(category = %selected, count = tickets.len(), "listing tickets");
            let payload: Vec<Value> = tickets.iter().map(|t| ticket_json(&storefront, t)).collect();
            let text: Vec<String> = tickets.iter().map(|t| ticket_line(&storefront, t)).collect();
            emit(output_mode, &Value::Array(payload), &text)
        }
        Commands::Artworks => {
            storefront.artworks().fetch().await?;
            let artworks = storefront.visible_artworks(&selected);
            let payload: Vec<Value> = artworks.iter().map(artwork_json).collect();
            let text: Vec<String> = artworks
                .iter()
                .map(|a| format!("{}\t{}\t{}", a.id, a.category, a.prompt))
                .collect();
            emit(output_mode, &Value::Array(payload), &text)
        }
        Commands::Categories { collection } => {
            let categories = match Collection::from(*collection) {
                Collection::Tickets => {
                    storefront.tickets().fetch().await?;
                    storefront.tickets().categories()
                }
                Collection::Artworks => {
                    storefront.artworks().fetch().await?;
                    storefront.artworks().categories()
                }
            };
            let text: Vec<String> = categories.iter().map(ToString::to_string).collect();
            emit(output_mode, &json!(categories), &text)
        }
        Commands::Cart { items, set } => price_cart(&storefront, items, set, output_mode).await,
        Commands::Countdown { .. } | Commands::Schema { .. } => Err(Error::InvalidArgument {
            name: "command",
            reason: "does not read the catalog".to_string(),
        }),
    }
}

fn ticket_json(storefront: &Storefront, ticket: &Ticket) -> Value {
    json!({
        "id": ticket.id,
        "title": ticket.title,
        "category": ticket.category,
        "ticket_price": ticket.ticket_price.to_string(),
        "prize_count": ticket.prize_count,
        "prize_value": ticket.prize_value,
        "is_live": ticket.is_live,
        "is_available": ticket.is_available,
        "remaining_percent": ticket.remaining_ticket_percent(),
        "days_until_raffle": storefront.days_until_raffle(ticket),
    })
}

fn ticket_line(storefront: &Storefront, ticket: &Ticket) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{:.0}%\t{}d",
        ticket.id,
        ticket.category,
        ticket.title,
        ticket.ticket_price,
        ticket.remaining_ticket_percent(),
        storefront.days_until_raffle(ticket)
    )
}

fn artwork_json(artwork: &Artwork) -> Value {
    json!({
        "id": artwork.id,
        "category": artwork.category,
        "prompt": artwork.prompt,
        "image_url": artwork.image_url,
    })
}

async fn price_cart(
    storefront: &Storefront,
    items: &[String],
    set: &[String],
    output_mode: OutputMode,
) -> Result<()> {
    storefront.tickets().fetch().await?;
    for raw in items {
        let (ticket_id, count) = parse_cart_item(raw)?;
        let ticket = lookup_ticket(storefront, ticket_id)?;
        storefront.cart().add_ticket(&ticket, count).await?;
    }
    for raw in set {
        let (ticket_id, count) = parse_cart_item(raw)?;
        let ticket = lookup_ticket(storefront, ticket_id)?;
        storefront.cart().set_multiplier(&ticket, count).await?;
    }

    let cart = storefront.cart().snapshot().await;
    let lines: Vec<Value> = cart
        .selections()
        .iter()
        .map(|s| {
            json!({
                "ticket_id": s.ticket_id(),
                "title": s.ticket.title,
                "multiplier": s.multiplier,
                "line_total": line_total(s),
            })
        })
        .collect();
    let mut text: Vec<String> = cart
        .selections()
        .iter()
        .map(|s| format!("{}\tx{}\t{}", s.ticket_id(), s.multiplier, line_total(s)))
        .collect();
    text.push(format!("total\t{}", cart.total_price()));
    emit(
        output_mode,
        &json!({
            "selections": lines,
            "ticket_count": cart.ticket_count(),
            "total_price": cart.total_price().to_string(),
            "multiplier_presets": MULTIPLIER_PRESETS,
        }),
        &text,
    )
}

// The ledger rejects any line whose total overflows, so every held line has one.
fn line_total(selection: &TicketSelection) -> String {
    selection
        .line_total()
        .map(|total| total.to_string())
        .unwrap_or_default()
}

fn parse_cart_item(raw: &str) -> Result<(&str, u32)> {
    let Some((ticket_id, count)) = raw.split_once(':') else {
        return Ok((raw, 1));
    };
    count
        .trim()
        .parse::<u32>()
        .map(|count| (ticket_id, count))
        .map_err(|_| Error::InvalidArgument {
            name: "cart item",
            reason: format!("`{raw}` must be TICKET_ID or TICKET_ID:COUNT"),
        })
}

fn lookup_ticket(storefront: &Storefront, ticket_id: &str) -> Result<Ticket> {
    storefront
        .find_ticket(ticket_id)
        .ok_or_else(|| Error::InvalidArgument {
            name: "ticket",
            reason: format!("unknown ticket id `{ticket_id}`"),
        })
}
