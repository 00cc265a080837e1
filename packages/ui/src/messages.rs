//! User-facing strings.

// Location badge
pub const LOADING_LOCATION: &str = "Loading location…";
pub const INSECURE_CONTEXT: &str = "Enable HTTPS for location";
pub const LOCATION_BLOCKED: &str = "Location blocked";
pub const LOCATION_UNAVAILABLE: &str = "Location unavailable";
pub const LOCATION_UNKNOWN: &str = "Unknown location";
pub const GEOLOCATION_UNSUPPORTED: &str = "Geolocation not supported";

// Profile modal
pub const NAME_REQUIRED: &str = "Укажите имя.";

// Authentication
pub const NETWORK_UNAVAILABLE: &str = "Сеть недоступна. Попробуйте ещё раз.";
pub const LOGIN_FAILED: &str = "Ошибка входа";
pub const DRAFT_INVALID: &str = "Проверьте корректность имени, почты и пароля (мин. 6 символов).";
pub const CODE_NOT_SENT: &str = "Не удалось отправить код";
pub const CODE_SENT: &str = "Код отправлен на почту";
pub const CODE_RESENT: &str = "Код повторно отправлен на почту";
pub const STEP_ONE_FIRST: &str = "Сначала заполните шаг 1.";
pub const CODE_REQUIRED: &str = "Введите код из письма.";
pub const CODE_REJECTED: &str = "Код неверный или просрочен";
pub const AVATAR_REQUIRED: &str = "Пожалуйста, загрузите аватар.";
pub const AVATAR_FAILED: &str = "Не удалось загрузить аватар";
pub const AUTO_LOGIN_FAILED: &str = "Ошибка авто-входа";
pub const PROFILE_PLACEHOLDER: &str = "Профиль";
