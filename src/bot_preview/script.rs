use crate::domain::ChatTurn;

pub const MAIN_MENU: &str = "🏠 Главное меню";
pub const CATALOG: &str = "📦 Каталог товаров";

/// The fixed conversation replayed turn by turn.
pub fn demo_script() -> Vec<ChatTurn> {
    vec![
        ChatTurn::bot("👋 Привет! Я бот интернет-магазина. Выберите действие:", "10:30")
            .with_keyboard([CATALOG, "🛒 Корзина", "📋 Мои заказы", "ℹ️ Помощь"]),
        ChatTurn::user(CATALOG, "10:31"),
        ChatTurn::bot("📦 Выберите категорию товаров:", "10:31").with_keyboard([
            "🎧 Аудиотехника",
            "📱 Смартфоны",
            "⌚ Умные устройства",
            "⌨️ Компьютерная периферия",
        ]),
        ChatTurn::user("🎧 Аудиотехника", "10:32"),
        ChatTurn::bot(
            "🎧 Аудиотехника\n\n\
             🎧 Беспроводные наушники Sony WH-1000XM5\n\
             💰 29 990 ₽\n\
             ⭐ 4.8 (156 отзывов)\n\n\
             📝 Премиальные беспроводные наушники с активным шумоподавлением, 30 часов работы от батареи\n\n\
             Хотите добавить в корзину?",
            "10:32",
        )
        .with_keyboard(["✅ Добавить в корзину", "⬅️ Назад к категориям", MAIN_MENU]),
    ]
}

/// The single free-form branch: echo the pressed button back.
pub fn canned_reply(label: &str, timestamp: impl Into<String>) -> ChatTurn {
    ChatTurn::bot(
        format!("Вы выбрали: {label}\n\nЭто демо-версия. В реальном боте здесь будет полный функционал! 🚀"),
        timestamp,
    )
    .with_keyboard([MAIN_MENU, CATALOG])
}
