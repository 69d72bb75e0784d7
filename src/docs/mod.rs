use utoipa::OpenApi;

use crate::app::controller::email::TestEmailRequest;
use crate::app::controller::health::HealthBody;
use crate::app::controller::product::ProductList;
use crate::app::controller::subscription::{CreateSubscription, SubscriptionList};
use crate::app::controller::telegram::{BotStatus, TelegramChat, TelegramMessage, TelegramUpdate};
use crate::app::controller::{
    EmailControllerApi, HealthControllerApi, ProductControllerApi, SubscriptionControllerApi,
    TelegramControllerApi,
};
use crate::app::model::{product, subscription};
use crate::app::response::SimpleResponse;

#[derive(OpenApi)]
#[openapi(
    nest(
        (path = "/api", api = EmailControllerApi),
        (path = "/api/products", api = ProductControllerApi),
        (path = "/api", api = SubscriptionControllerApi),
        (path = "/api/telegram", api = TelegramControllerApi),
        (path = "", api = HealthControllerApi)
    ),
    components(schemas(
        SimpleResponse,
        HealthBody,
        BotStatus,
        TestEmailRequest,
        CreateSubscription,
        ProductList,
        SubscriptionList,
        TelegramUpdate,
        TelegramMessage,
        TelegramChat,
        product::Model,
        subscription::Model,
        subscription::Channel,
        pricewatch_core::model::Price,
    )),
    info(description = "Pricewatch API")
)]
pub struct MainApiDoc;
