//! Welcome message template.

const WELCOME_BODY: &str = "Добро пожаловать в команду Академии Международного Бизнеса! 🎉\n\n\
Мы очень рады, что ты с нами! \n\
Желаем быстрой адаптации, интересных задач и крутых результатов в нашей дружной команде. \
Не стесняйся задавать вопросы – здесь всегда помогут и поддержат.\n\n\
Важно для всех:\n\
📌 В ветке отдела есть форма ежедневного отчёта, которую необходимо заполнять каждый день до 21:00. \n\
Это помогает нам быть на одной волне и эффективно работать.\n\n\
Давай настраиваться на продуктивную работу и отличное взаимодействие! 🚀\n\n\
В общем чате АМБ тебя скоро поприветствуют и там ты увидишь всех нас. \n\n\
В ветке \"отчет отдела\"- вся команда твоего отдела, знакомься!\n\n\
P.S. Если что-то непонятно – обращайся, с радостью поможем! 😊";

/// Compose the welcome text, addressing `alias` when it is non-empty.
pub fn welcome_text(alias: &str) -> String {
    if alias.is_empty() {
        WELCOME_BODY.to_string()
    } else {
        format!("{}, {}", alias, WELCOME_BODY)
    }
}
