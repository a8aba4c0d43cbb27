//! Plain-text rendering of the shop views.
//!
//! Each view is a small borrowed wrapper implementing `Display`.

use std::fmt::{self, Display, Formatter};
use crate::catalog::CategoryFilter;
use crate::domain::{CartSnapshot, ChatRole, ChatTurn, Order, OrderDraft, OrderStatus, DeliveryMethod, PaymentMethod};
use crate::order_actor::{Field, FieldErrors};
use crate::shop::{CatalogPage, NavHeader, ProductCard, View};

const RULE: &str = "────────────────────────────────────────";

/// Whole rubles grouped by thousands: `29990` → `29 990 ₽`.
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped.push_str(" ₽");
    grouped
}

/// "товар" for exactly one line, "товаров" otherwise.
fn line_count_label(count: usize) -> String {
    format!("{} товар{}", count, if count != 1 { "ов" } else { "" })
}

pub struct HeaderView<'a>(pub &'a NavHeader);

impl Display for HeaderView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let header = self.0;
        let tab = |view: View, label: String| {
            if header.view == view {
                format!("[{label}]")
            } else {
                format!(" {label} ")
            }
        };
        let cart_label = if header.cart_items > 0 {
            format!("{} ({})", View::Cart.title(), header.cart_items)
        } else {
            View::Cart.title().to_string()
        };
        writeln!(f, "🛍️ Shop Bot MVP  · DEMO VERSION")?;
        writeln!(
            f,
            "{} {} {} {}",
            tab(View::Catalog, View::Catalog.title().to_string()),
            tab(View::Cart, cart_label),
            tab(View::Orders, format!("{} ({})", View::Orders.title(), header.order_count)),
            tab(View::Bot, View::Bot.title().to_string()),
        )?;
        writeln!(f, "{RULE}")
    }
}

pub struct ProductCardView<'a> {
    pub card: &'a ProductCard,
    /// Show brand/material/size/color lines.
    pub details: bool,
}

impl Display for ProductCardView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let product = &self.card.product;
        write!(f, "{} [{}] {}", product.emoji_or_default(), product.id, product.name)?;
        if let Some(discount) = product.discount {
            write!(f, "  -{discount}%")?;
        }
        writeln!(f)?;
        writeln!(f, "    {}", product.category)?;
        if !product.description.is_empty() {
            writeln!(f, "    {}", product.description)?;
        }

        write!(f, "    ")?;
        if let Some(old_price) = product.old_price {
            write!(f, "~{}~ ", format_price(old_price))?;
        }
        write!(f, "{}", format_price(product.price))?;
        if let Some(rating) = product.rating {
            write!(f, "   ⭐ {} ({})", rating, product.reviews.unwrap_or(0))?;
        }
        writeln!(f)?;

        let button = if !product.in_stock {
            "Нет в наличии"
        } else if self.card.recently_added {
            "✓ Добавлено!"
        } else {
            "Добавить в корзину"
        };
        write!(f, "    ({button})")?;
        if let Some(quantity) = self.card.in_cart {
            write!(f, "  в корзине: {quantity}")?;
        }
        writeln!(f)?;

        if self.details {
            let extras = [
                ("Бренд", &product.brand),
                ("Материал", &product.material),
                ("Размер", &product.size),
                ("Цвет", &product.color),
            ];
            for (label, value) in extras {
                if let Some(value) = value {
                    writeln!(f, "    {label}: {value}")?;
                }
            }
        }
        Ok(())
    }
}

pub struct CatalogView<'a>(pub &'a CatalogPage);

impl Display for CatalogView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let page = self.0;
        writeln!(f, "🛍️ Каталог товаров")?;
        let category = match &page.query.category {
            CategoryFilter::All => "Все категории".to_string(),
            CategoryFilter::Only(name) => name.clone(),
        };
        writeln!(f, "Поиск: \"{}\"  Категория: {}", page.query.search, category)?;
        writeln!(f, "Категории: {}", page.categories.join(" | "))?;
        writeln!(f, "Найдено товаров: {}", page.cards.len())?;
        writeln!(f)?;

        if page.is_empty() {
            writeln!(f, "🔍 Товары не найдены")?;
            return writeln!(f, "Попробуйте изменить параметры поиска");
        }
        for card in &page.cards {
            write!(f, "{}", ProductCardView { card, details: false })?;
        }
        Ok(())
    }
}

pub struct CartView<'a> {
    pub cart: &'a CartSnapshot,
    pub free_delivery_threshold: u64,
}

impl Display for CartView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let cart = self.cart;
        if cart.is_empty() {
            writeln!(f, "🛒 Корзина пуста")?;
            return writeln!(f, "Добавьте товары из каталога");
        }

        writeln!(f, "🛒 Корзина — {}", line_count_label(cart.lines.len()))?;
        for line in &cart.lines {
            writeln!(
                f,
                "  {} [{}] {}  {} × {} = {}",
                line.product.emoji_or_default(),
                line.product.id,
                line.product.name,
                format_price(line.product.price),
                line.quantity,
                format_price(line.line_total()),
            )?;
        }
        writeln!(f, "{RULE}")?;
        writeln!(f, "Итого: {}", format_price(cart.total))?;
        writeln!(
            f,
            "Доставка: Бесплатно при заказе от {}",
            format_price(self.free_delivery_threshold)
        )
    }
}

fn delivery_label(method: DeliveryMethod) -> &'static str {
    match method {
        DeliveryMethod::Courier => "Курьер (бесплатно)",
        DeliveryMethod::Pickup => "Самовывоз",
    }
}

fn payment_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Card => "Банковская карта",
        PaymentMethod::Cash => "Наличными при получении",
    }
}

pub struct CheckoutView<'a> {
    pub cart: &'a CartSnapshot,
    pub draft: &'a OrderDraft,
    pub errors: Option<&'a FieldErrors>,
}

impl Display for CheckoutView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "📝 Оформление заказа")?;
        writeln!(f, "Ваш заказ:")?;
        for line in &self.cart.lines {
            writeln!(
                f,
                "  {} {}  {} × {} = {}",
                line.product.emoji_or_default(),
                line.product.name,
                format_price(line.product.price),
                line.quantity,
                format_price(line.line_total()),
            )?;
        }
        writeln!(f, "Итого: {}  (Доставка: Бесплатно)", format_price(self.cart.total))?;
        writeln!(f, "{RULE}")?;

        let error_for = |field: Field| self.errors.and_then(|errors| errors.get(field));
        let fields = [
            ("ФИО *", &self.draft.name, Some(Field::Name)),
            ("Телефон *", &self.draft.phone, Some(Field::Phone)),
            ("Email *", &self.draft.email, Some(Field::Email)),
            ("Адрес доставки *", &self.draft.address, Some(Field::Address)),
            ("Комментарий к заказу", &self.draft.comment, None),
        ];
        for (label, value, field) in fields {
            writeln!(f, "{label}: {value}")?;
            if let Some(message) = field.and_then(error_for) {
                writeln!(f, "  ⚠ {message}")?;
            }
        }
        writeln!(f, "Способ доставки: {}", delivery_label(self.draft.delivery_method))?;
        writeln!(f, "Способ оплаты: {}", payment_label(self.draft.payment_method))
    }
}

fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Processing => "В обработке",
        OrderStatus::Completed => "Выполнен",
        OrderStatus::Failed => "Ошибка",
    }
}

/// Order history, newest first.
pub struct OrdersView<'a>(pub &'a [Order]);

impl Display for OrdersView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Мои заказы")?;
        if self.0.is_empty() {
            return writeln!(f, "У вас пока нет заказов");
        }
        for order in self.0.iter().rev() {
            writeln!(f, "{RULE}")?;
            writeln!(
                f,
                "Заказ #{}  [{}]  {}",
                order.id,
                status_label(order.status),
                order.created_at.format("%d.%m.%Y %H:%M:%S"),
            )?;
            for line in &order.items {
                writeln!(
                    f,
                    "  {} × {}  {}",
                    line.product.name,
                    line.quantity,
                    format_price(line.line_total())
                )?;
            }
            writeln!(f, "Итого: {}", format_price(order.total))?;
            if !order.contact.address.is_empty() {
                writeln!(
                    f,
                    "{}: {}",
                    delivery_label(order.contact.delivery_method),
                    order.contact.address
                )?;
            }
        }
        Ok(())
    }
}

/// Chat bubbles followed by the reply keyboard of the last message.
pub struct TranscriptView<'a>(pub &'a [ChatTurn]);

impl Display for TranscriptView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "🤖 Магазин Bot · онлайн")?;
        for turn in self.0 {
            write!(f, "{}", TurnView(turn))?;
        }
        match self.0.last() {
            Some(last) => write!(f, "{}", KeyboardView(&last.keyboard)),
            None => Ok(()),
        }
    }
}

pub struct KeyboardView<'a>(pub &'a [String]);

impl Display for KeyboardView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for button in self.0 {
            writeln!(f, "  [ {button} ]")?;
        }
        Ok(())
    }
}

pub struct TurnView<'a>(pub &'a ChatTurn);

impl Display for TurnView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (prefix, indent) = match self.0.role {
            ChatRole::Bot => ("🤖", ""),
            ChatRole::User => ("🙂", "                "),
        };
        let mut lines = self.0.text.lines();
        if let Some(first) = lines.next() {
            writeln!(f, "{indent}{prefix} {first}")?;
        }
        for line in lines {
            writeln!(f, "{indent}   {line}")?;
        }
        writeln!(f, "{indent}   {}", self.0.timestamp)
    }
}
