use crate::model::{SignalCategory, SignalReport};

/// Emoji-tagged label for the signal card.
pub fn category_label(category: SignalCategory) -> &'static str {
    match category {
        SignalCategory::StrongBuy => "🚀 STRONG BUY",
        SignalCategory::Buy => "🟢 BUY",
        SignalCategory::Hold => "⏸️ HOLD",
        SignalCategory::Sell => "🔴 SELL",
        SignalCategory::StrongSell => "💥 STRONG SELL",
    }
}

/// The HTML signal card sent to the chat: header, signal, the indicator
/// readout, key levels, rationale bullets and a UTC timestamp.
pub fn render_signal(report: &SignalReport) -> String {
    let bullets: Vec<String> = report
        .result
        .rationale
        .iter()
        .map(|note| format!("• {note}"))
        .collect();

    format!(
        "🎯 <b>{symbol}/USDT SIGNAL</b>\n\
         💰 Price: <b>${price}</b>\n\
         📊 Signal: <b>{label}</b>\n\
         \n\
         <b>Technical Analysis:</b>\n\
         • RSI (14): {rsi}\n\
         • MA20: ${ma20}\n\
         • MA50: ${ma50}\n\
         • MACD: {macd}\n\
         \n\
         <b>Key Levels:</b>\n\
         • Support: ${support}\n\
         • Resistance: ${resistance}\n\
         \n\
         <b>Indicators:</b>\n\
         {bullets}\n\
         \n\
         ⏰ Time: {time} UTC",
        symbol = report.symbol,
        price = report.price,
        label = category_label(report.result.category),
        rsi = report.snapshot.rsi,
        ma20 = report.snapshot.sma20,
        ma50 = report.snapshot.sma50,
        macd = report.snapshot.macd.line,
        support = report.snapshot.support,
        resistance = report.snapshot.resistance,
        bullets = bullets.join("\n"),
        time = report.result.generated_at.format("%H:%M:%S"),
    )
}

/// Plain-text startup banner listing what the daemon watches.
pub fn render_banner(symbols: &[&str], cooldown_seconds: u64) -> String {
    format!(
        "🤖 Coin Sentinel started!\n\
         \n\
         📊 Monitoring: {symbols}\n\
         ⏰ Next update in {minutes} minutes\n\
         🎯 Signals based on RSI, MACD, MA analysis",
        symbols = symbols.join(", "),
        minutes = cooldown_seconds / 60,
    )
}
