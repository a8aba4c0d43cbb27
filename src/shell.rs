//! Line-oriented interactive front end over a running [`ShopSystem`].

use std::str::FromStr;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use crate::app_system::{BotPreview, ShopSystem};
use crate::catalog::{CatalogQuery, CategoryFilter};
use crate::domain::{OrderDraft, OrderId, ProductId};
use crate::error::ShopError;
use crate::order_actor::{Field, FieldErrors, OrderError};
use crate::render::{
    CartView, CatalogView, CheckoutView, HeaderView, OrdersView, ProductCardView, TranscriptView,
};
use crate::shop::View;

const HELP: &str = "\
Команды:
  view <catalog|cart|checkout|orders|bot>   перейти к разделу
  search <текст>                            поиск по названию и описанию (пусто: сброс)
  category <название|all>                   фильтр по категории
  product <id>                              карточка товара
  add <id>                                  добавить в корзину
  qty <id> <n>                              изменить количество (0 удаляет)
  rm <id>                                   удалить из корзины
  checkout                                  оформить заказ
  set <name|phone|email|address|comment|delivery|payment> <значение>
  submit                                    отправить заказ
  orders                                    мои заказы
  order <id>                                один заказ
  press <кнопка>                            нажать кнопку в боте
  (пустая строка)                           обновить экран
  quit                                      выход";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Help,
    Refresh,
    View(View),
    Search(String),
    Category(CategoryFilter),
    Product(ProductId),
    Add(ProductId),
    Quantity(ProductId, i64),
    Remove(ProductId),
    Checkout,
    Set(String, String),
    Submit,
    Orders,
    Order(OrderId),
    Press(String),
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let required = |what: &str| {
            if rest.is_empty() {
                Err(format!("{word}: укажите {what}"))
            } else {
                Ok(rest.to_string())
            }
        };

        match word {
            "" => Ok(ShellCommand::Refresh),
            "help" | "?" => Ok(ShellCommand::Help),
            "view" => rest.parse().map(ShellCommand::View),
            "search" => Ok(ShellCommand::Search(rest.to_string())),
            "category" => Ok(ShellCommand::Category(CategoryFilter::parse(&required("категорию")?))),
            "product" => required("id товара").map(ShellCommand::Product),
            "add" => required("id товара").map(ShellCommand::Add),
            "rm" => required("id товара").map(ShellCommand::Remove),
            "qty" => {
                let (id, quantity) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "qty: укажите id и количество".to_string())?;
                let quantity = quantity
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| format!("qty: не число: {}", quantity.trim()))?;
                Ok(ShellCommand::Quantity(id.to_string(), quantity))
            }
            "checkout" => Ok(ShellCommand::Checkout),
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                if field.is_empty() {
                    return Err("set: укажите поле".to_string());
                }
                Ok(ShellCommand::Set(field.to_string(), value.to_string()))
            }
            "submit" => Ok(ShellCommand::Submit),
            "orders" => Ok(ShellCommand::Orders),
            "order" => required("номер заказа").map(ShellCommand::Order),
            "press" => required("кнопку").map(ShellCommand::Press),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(format!("неизвестная команда: {other} (help — список команд)")),
        }
    }
}

/// Writes one form field. Unknown fields and bad enum values are rejected.
///
/// Returns the validated field that was touched, if any.
fn set_field(draft: &mut OrderDraft, field: &str, value: String) -> Result<Option<Field>, String> {
    let touched = match field {
        "name" => {
            draft.name = value;
            Some(Field::Name)
        }
        "phone" => {
            draft.phone = value;
            Some(Field::Phone)
        }
        "email" => {
            draft.email = value;
            Some(Field::Email)
        }
        "address" => {
            draft.address = value;
            Some(Field::Address)
        }
        "comment" => {
            draft.comment = value;
            None
        }
        "delivery" => {
            draft.delivery_method = value.parse()?;
            None
        }
        "payment" => {
            draft.payment_method = value.parse()?;
            None
        }
        other => return Err(format!("unknown form field: {other}")),
    };
    Ok(touched)
}

/// Applies a form edit and drops the stale message of the edited field.
fn edit_form(
    draft: &mut OrderDraft,
    errors: &mut Option<FieldErrors>,
    field: &str,
    value: String,
) -> Result<(), String> {
    if let (Some(touched), Some(current)) = (set_field(draft, field, value)?, errors.as_mut()) {
        current.clear(touched);
        if current.is_empty() {
            *errors = None;
        }
    }
    Ok(())
}

pub struct Shell<'a> {
    system: &'a ShopSystem,
    free_delivery_threshold: u64,
    query: CatalogQuery,
    draft: OrderDraft,
    errors: Option<FieldErrors>,
    preview: Option<BotPreview>,
}

impl<'a> Shell<'a> {
    pub fn new(system: &'a ShopSystem, free_delivery_threshold: u64) -> Self {
        Self {
            system,
            free_delivery_threshold,
            query: CatalogQuery::default(),
            draft: OrderDraft::default(),
            errors: None,
            preview: None,
        }
    }

    pub async fn run(mut self) -> Result<(), String> {
        info!("Shell started");
        println!("{HELP}\n");
        self.render().await.map_err(|e| e.to_string())?;

        let mut lines = BufReader::new(stdin()).lines();
        while let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? {
            let command = match line.parse::<ShellCommand>() {
                Ok(command) => command,
                Err(message) => {
                    println!("⚠ {message}");
                    continue;
                }
            };
            if command == ShellCommand::Quit {
                break;
            }
            debug!(?command, "Shell command");
            if let Err(message) = self.execute(command).await {
                warn!(%message, "Shell command failed");
                println!("⚠ {message}");
            }
        }
        info!("Shell finished");
        Ok(())
    }

    async fn execute(&mut self, command: ShellCommand) -> Result<(), String> {
        let system = self.system;
        let shop = &system.shop_client;
        match command {
            ShellCommand::Help => {
                println!("{HELP}");
                return Ok(());
            }
            ShellCommand::Refresh | ShellCommand::Quit => {}
            ShellCommand::View(view) => self.navigate(view).await?,
            ShellCommand::Checkout => self.navigate(View::Checkout).await?,
            ShellCommand::Orders => self.navigate(View::Orders).await?,
            ShellCommand::Search(search) => {
                self.query.search = search;
                self.navigate(View::Catalog).await?;
            }
            ShellCommand::Category(category) => {
                self.query.category = category;
                self.navigate(View::Catalog).await?;
            }
            ShellCommand::Product(product_id) => {
                let card = shop.product(product_id).await.map_err(|e| e.to_string())?;
                print!("{}", ProductCardView { card: &card, details: true });
                return Ok(());
            }
            ShellCommand::Add(product_id) => {
                shop.add_to_cart(product_id).await.map_err(|e| e.to_string())?;
            }
            ShellCommand::Quantity(product_id, quantity) => {
                shop.update_quantity(product_id, quantity).await.map_err(|e| e.to_string())?;
            }
            ShellCommand::Remove(product_id) => {
                shop.remove_from_cart(product_id).await.map_err(|e| e.to_string())?;
            }
            ShellCommand::Set(field, value) => edit_form(&mut self.draft, &mut self.errors, &field, value)?,
            ShellCommand::Submit => self.submit().await?,
            ShellCommand::Order(order_id) => {
                match system.order_client.get_order(order_id.clone()).await {
                    Ok(Some(order)) => print!("{}", OrdersView(std::slice::from_ref(&order))),
                    Ok(None) => println!("Заказ {order_id} не найден"),
                    Err(e) => return Err(e.to_string()),
                }
                return Ok(());
            }
            ShellCommand::Press(label) => {
                let preview = self
                    .preview
                    .as_ref()
                    .ok_or_else(|| "Откройте бота: view bot".to_string())?;
                preview.client.press(label).await.map_err(|e| e.to_string())?;
            }
        }
        self.render().await.map_err(|e| e.to_string())
    }

    /// Switches the active view. The bot preview is remounted on entry and
    /// torn down on exit.
    async fn navigate(&mut self, view: View) -> Result<(), String> {
        self.system.shop_client.navigate(view).await.map_err(|e| e.to_string())?;
        self.preview = None;
        if view == View::Bot {
            self.preview = Some(self.system.open_bot_preview());
        }
        Ok(())
    }

    async fn submit(&mut self) -> Result<(), String> {
        match self.system.shop_client.place_order(self.draft.clone()).await {
            Ok(order) => {
                println!("✅ Заказ #{} оформлен!\n{}", order.id, order.notice);
                self.draft = OrderDraft::default();
                self.errors = None;
                Ok(())
            }
            Err(ShopError::Order(OrderError::Validation(errors))) => {
                println!("⚠ Проверьте форму: найдено ошибок: {}", errors.len());
                self.errors = Some(errors);
                Ok(())
            }
            Err(e) => Err(e.to_string()),
        }
    }

    async fn render(&self) -> Result<(), ShopError> {
        let shop = &self.system.shop_client;
        let header = shop.header().await?;
        print!("{}", HeaderView(&header));
        match header.view {
            View::Catalog => {
                let page = shop.catalog(self.query.clone()).await?;
                print!("{}", CatalogView(&page));
            }
            View::Cart => {
                let cart = shop.cart().await?;
                print!("{}", CartView { cart: &cart, free_delivery_threshold: self.free_delivery_threshold });
            }
            View::Checkout => {
                let cart = shop.cart().await?;
                print!("{}", CheckoutView { cart: &cart, draft: &self.draft, errors: self.errors.as_ref() });
            }
            View::Orders => {
                let orders = shop.orders().await?;
                print!("{}", OrdersView(&orders));
            }
            View::Bot => {
                if let Some(preview) = &self.preview {
                    let snapshot = preview.client.subscribe().borrow().clone();
                    print!("{}", TranscriptView(&snapshot.turns));
                }
            }
        }
        println!();
        Ok(())
    }
}
